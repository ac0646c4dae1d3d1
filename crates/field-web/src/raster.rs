//! Canvas 2D renderer.
//!
//! Draws the same [`DrawList`] as the GPU renderer, projecting volume
//! variants through the field camera so it can stand in when WebGPU is
//! unavailable.

use crate::css::{rgba_css, transparent_css};
use anyhow::anyhow;
use field_core::config::{ClearMode, GlowStyle};
use field_core::cosmetic::drift_offset;
use field_core::{DrawList, FieldCamera, FieldRenderer, FieldState, Projected, Viewport};
use glam::Vec3;
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct RasterRenderer {
    ctx: Option<web::CanvasRenderingContext2d>,
    viewport: Viewport,
    draw: DrawList,
    // (depth, sprite index, projection) scratch, reused across frames
    order: Vec<(f32, usize, Projected)>,
}

impl RasterRenderer {
    pub fn new(canvas: &web::HtmlCanvasElement, viewport: &Viewport) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext(2d) threw: {e:?}"))?
            .ok_or_else(|| anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("2d context has an unexpected type"))?;
        let mut renderer = Self {
            ctx: Some(ctx),
            viewport: *viewport,
            draw: DrawList::new(),
            order: Vec::new(),
        };
        renderer.resize(viewport);
        log::info!("canvas 2d renderer ready");
        Ok(renderer)
    }
}

impl FieldRenderer for RasterRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        if let Some(ctx) = &self.ctx {
            // Absolute transform; a resized canvas already resets it, scale() would compound
            let dpr = viewport.device_pixel_ratio as f64;
            if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
                log::warn!("setTransform failed: {e:?}");
            }
        }
    }

    fn render(&mut self, field: &FieldState) -> anyhow::Result<()> {
        let Some(ctx) = self.ctx.as_ref() else {
            return Ok(());
        };
        let vp = self.viewport;
        self.draw.rebuild(field);
        let camera = FieldCamera::for_field(field, &vp);
        let draw = &self.draw;
        let (w, h) = (vp.width as f64, vp.height as f64);

        match draw.clear {
            ClearMode::Clear => ctx.clear_rect(0.0, 0.0, w, h),
            ClearMode::Fade(f) => {
                ctx.set_fill_style_str(&rgba_css([0.0, 0.0, 0.0, f]));
                ctx.fill_rect(0.0, 0.0, w, h);
            }
        }

        let drift = |p: Vec3, r: Vec3| {
            if draw.volume {
                p + drift_offset(p, r, draw.elapsed_sec, draw.drift_amount)
            } else {
                p
            }
        };

        ctx.set_shadow_blur(0.0);
        for seg in &draw.segments {
            let (Some(a), Some(b)) = (camera.project(seg.from, &vp), camera.project(seg.to, &vp))
            else {
                continue;
            };
            let (ax, ay) = (a.screen.x as f64, a.screen.y as f64);
            let (bx, by) = (b.screen.x as f64, b.screen.y as f64);
            if seg.is_solid() {
                ctx.set_stroke_style_str(&rgba_css(seg.from_color));
            } else {
                let grad = ctx.create_linear_gradient(ax, ay, bx, by);
                add_stop(&grad, 0.0, &rgba_css(seg.from_color))?;
                add_stop(&grad, 1.0, &rgba_css(seg.to_color))?;
                ctx.set_stroke_style_canvas_gradient(&grad);
            }
            ctx.set_line_width(seg.width.max(0.0) as f64);
            ctx.begin_path();
            ctx.move_to(ax, ay);
            ctx.line_to(bx, by);
            ctx.stroke();
        }

        self.order.clear();
        for (i, s) in draw.sprites.iter().enumerate() {
            if let Some(p) = camera.project(drift(s.position, s.randomness), &vp) {
                self.order.push((p.depth, i, p));
            }
        }
        if draw.volume {
            // far to near
            self.order.sort_by(|a, b| b.0.total_cmp(&a.0));
        }
        for &(_, i, p) in &self.order {
            let s = &draw.sprites[i];
            let radius = (s.size * p.scale) as f64;
            if !(radius > 0.0) {
                continue;
            }
            let (x, y) = (p.screen.x as f64, p.screen.y as f64);
            let rgba = s.rgba();
            match s.glow {
                GlowStyle::None => ctx.set_shadow_blur(0.0),
                GlowStyle::ShadowBlur(px) => {
                    ctx.set_shadow_blur(px.max(0.0) as f64);
                    ctx.set_shadow_color(&rgba_css([rgba[0], rgba[1], rgba[2], 1.0]));
                }
                GlowStyle::Radial(extent) => {
                    ctx.set_shadow_blur(0.0);
                    let outer = radius * extent.max(1.0) as f64;
                    let grad = ctx
                        .create_radial_gradient(x, y, 0.0, x, y, outer)
                        .map_err(js_err)?;
                    add_stop(&grad, 0.0, &rgba_css(rgba))?;
                    add_stop(&grad, 1.0, &transparent_css(rgba))?;
                    ctx.set_fill_style_canvas_gradient(&grad);
                    ctx.begin_path();
                    ctx.arc(x, y, outer, 0.0, TAU).map_err(js_err)?;
                    ctx.fill();
                }
            }
            ctx.set_fill_style_str(&rgba_css(rgba));
            ctx.begin_path();
            ctx.arc(x, y, radius, 0.0, TAU).map_err(js_err)?;
            ctx.fill();
        }
        ctx.set_shadow_blur(0.0);

        for ring in &draw.rings {
            let Some(p) = camera.project(ring.center, &vp) else {
                continue;
            };
            let radius = (ring.radius * p.scale) as f64;
            if !(radius > 0.0) {
                continue;
            }
            ctx.set_stroke_style_str(&rgba_css(ring.color));
            ctx.set_line_width(ring.width as f64);
            ctx.begin_path();
            ctx.arc(p.screen.x as f64, p.screen.y as f64, radius, 0.0, TAU)
                .map_err(js_err)?;
            ctx.stroke();
        }
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            ctx.clear_rect(0.0, 0.0, self.viewport.width as f64, self.viewport.height as f64);
            log::info!("canvas 2d renderer disposed");
        }
        self.draw = DrawList::new();
        self.order = Vec::new();
    }

    fn is_disposed(&self) -> bool {
        self.ctx.is_none()
    }
}

fn add_stop(grad: &web::CanvasGradient, offset: f32, color: &str) -> anyhow::Result<()> {
    grad.add_color_stop(offset, color).map_err(js_err)
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}
