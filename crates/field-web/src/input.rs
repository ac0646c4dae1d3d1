use web_sys as web;

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
///
/// The canvas normally sits at the viewport origin, but a parent with a
/// transform can still offset it.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let x = ev.client_x() as f64 - rect.left();
    let y = ev.client_y() as f64 - rect.top();
    (x as f32, y as f32)
}
