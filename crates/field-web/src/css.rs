/// CSS colour string for a linear RGBA in `[0, 1]`.
pub fn rgba_css(c: [f32; 4]) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let alpha = if c[3].is_finite() { c[3].clamp(0.0, 1.0) } else { 0.0 };
    format!(
        "rgba({},{},{},{:.3})",
        channel(c[0]),
        channel(c[1]),
        channel(c[2]),
        alpha
    )
}

/// Same colour with zero alpha; gradient tails fade to this.
pub fn transparent_css(c: [f32; 4]) -> String {
    rgba_css([c[0], c[1], c[2], 0.0])
}
