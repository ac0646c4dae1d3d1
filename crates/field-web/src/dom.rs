use crate::constants::{CANVAS_CLASS, CANVAS_CSS};
use crate::overrides::clamp_dpr;
use field_core::Viewport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    clamp_dpr(web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0))
}

/// A `<canvas>` created for and owned by one mounted field.
pub struct OwnedSurface {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    parent: Option<web::Element>,
}

impl OwnedSurface {
    pub fn new(document: &web::Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            canvas: create_canvas(document)?,
            parent: None,
        })
    }

    #[inline]
    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn attach(&mut self, parent: &web::Element) -> Result<(), JsValue> {
        parent.append_child(&self.canvas)?;
        self.parent = Some(parent.clone());
        Ok(())
    }

    /// Remove the canvas from the page. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if self.parent.take().is_some() {
            self.canvas.remove();
        }
    }

    /// Swap in a fresh canvas at the same place.
    ///
    /// A canvas that handed out a `webgpu` context can never yield a `2d`
    /// one, so falling back to the raster renderer needs a new element.
    pub fn replace_canvas(&mut self) -> Result<(), JsValue> {
        let fresh = create_canvas(&self.document)?;
        if self.parent.is_some() {
            self.canvas.replace_with_with_node_1(&fresh)?;
        }
        self.canvas = fresh;
        Ok(())
    }

    #[inline]
    pub fn sync_backing_size(&self) -> Viewport {
        sync_canvas_backing_size(&self.canvas)
    }
}

impl Drop for OwnedSurface {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Match the backing store to CSS size × device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let (mut w, mut h) = (rect.width(), rect.height());
    if w <= 0.0 || h <= 0.0 {
        // Not laid out yet; the canvas covers the window anyway
        if let Some(win) = web::window() {
            w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        }
    }
    let viewport = Viewport::new(w as f32, h as f32, dpr as f32);
    let (bw, bh) = viewport.backing_size();
    canvas.set_width(bw);
    canvas.set_height(bh);
    viewport
}

fn create_canvas(document: &web::Document) -> Result<web::HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("createElement(canvas) returned a non-canvas"))?;
    canvas.set_class_name(CANVAS_CLASS);
    canvas.set_attribute("aria-hidden", "true")?;
    canvas.style().set_css_text(CANVAS_CSS);
    Ok(canvas)
}

/// Collect the known `data-*` overrides from `el`.
pub fn dataset_overrides(el: &web::HtmlElement, keys: &[&str]) -> Vec<(String, String)> {
    let data = el.dataset();
    keys.iter()
        .filter_map(|k| data.get(k).map(|v| (k.to_string(), v)))
        .collect()
}
