//! Mounting a field into a host element and tearing it down again.

use crate::constants::{OVERRIDE_KEYS, VARIANT_DATA_KEY};
use crate::dom::{dataset_overrides, sync_canvas_backing_size, window_document, OwnedSurface};
use crate::events::Listener;
use crate::frame::FrameLoop;
use crate::input::pointer_css_px;
use crate::overrides::{build_config, resolve_variant, seed_from_unit};
use crate::raster::RasterRenderer;
use anyhow::anyhow;
use field_core::config::RendererKind;
use field_core::{Animator, FieldRenderer, FieldState, Variant, Viewport};
use field_gpu::SurfaceRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

struct Mounted {
    surface: OwnedSurface,
    // None when no rendering context could be obtained
    animator: Option<Rc<RefCell<Animator>>>,
    frame: Option<FrameLoop>,
    listeners: Vec<Listener>,
}

impl Mounted {
    fn teardown(mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
        for l in &mut self.listeners {
            l.remove();
        }
        if let Some(animator) = self.animator.take() {
            animator.borrow_mut().stop();
        }
        self.surface.detach();
        log::info!("field unmounted");
    }
}

/// Handle to a mounted background, returned to JavaScript.
#[wasm_bindgen]
pub struct FieldBackground {
    variant: Variant,
    inner: Rc<RefCell<Option<Mounted>>>,
}

#[wasm_bindgen]
impl FieldBackground {
    /// Stop the animation and remove the canvas. Safe to call repeatedly.
    pub fn unmount(&self) {
        let mounted = self.inner.borrow_mut().take();
        if let Some(m) = mounted {
            m.teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> String {
        self.variant.name().to_string()
    }

    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().is_some()
    }
}

/// Mount a particle field behind `parent`'s content.
///
/// `variant` overrides the parent's `data-variant`; other `data-*`
/// attributes tune the preset.
#[wasm_bindgen(js_name = mountBackground)]
pub async fn mount_background(
    parent: web::HtmlElement,
    variant: Option<String>,
) -> Result<FieldBackground, JsValue> {
    mount(parent, variant)
        .await
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Names of all built-in presets.
#[wasm_bindgen]
pub fn variants() -> js_sys::Array {
    Variant::ALL
        .iter()
        .map(|v| JsValue::from_str(v.name()))
        .collect()
}

pub(crate) async fn mount(
    parent: web::HtmlElement,
    requested: Option<String>,
) -> anyhow::Result<FieldBackground> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window_document().ok_or_else(|| anyhow!("no document"))?;

    let page_variant = parent.dataset().get(VARIANT_DATA_KEY);
    let variant = resolve_variant(requested.as_deref(), page_variant.as_deref());
    let (config, seed) = build_config(variant, &dataset_overrides(&parent, &OVERRIDE_KEYS));
    let seed = seed.unwrap_or_else(|| seed_from_unit(js_sys::Math::random()));

    let mut surface = OwnedSurface::new(&document).map_err(js_err)?;
    surface.attach(&parent).map_err(js_err)?;
    let viewport = surface.sync_backing_size();

    let handle = FieldBackground {
        variant,
        inner: Rc::new(RefCell::new(None)),
    };
    let Some(renderer) = create_renderer(config.style.renderer, &mut surface, viewport).await
    else {
        surface.detach();
        *handle.inner.borrow_mut() = Some(Mounted {
            surface,
            animator: None,
            frame: None,
            listeners: Vec::new(),
        });
        return Ok(handle);
    };
    // The GPU fallback may have swapped canvases
    let viewport = surface.sync_backing_size();

    let field = FieldState::new(config, viewport, seed)?;
    log::info!(
        "mounted {} ({} particles, seed {seed})",
        variant.name(),
        field.len()
    );
    let animator = Rc::new(RefCell::new(Animator::new(field, renderer)));

    let mut listeners = Vec::with_capacity(2);
    {
        let animator = animator.clone();
        let canvas = surface.canvas().clone();
        listeners.push(
            Listener::new(&window, "pointermove", move |ev: web::PointerEvent| {
                let (x, y) = pointer_css_px(&ev, &canvas);
                animator.borrow_mut().pointer_move(x, y, instant::now());
            })
            .map_err(js_err)?,
        );
    }
    {
        let animator = animator.clone();
        let canvas = surface.canvas().clone();
        listeners.push(
            Listener::new(&window, "resize", move |_: web::Event| {
                let viewport = sync_canvas_backing_size(&canvas);
                animator.borrow_mut().resize(viewport);
            })
            .map_err(js_err)?,
        );
    }

    let frame = {
        let animator = animator.clone();
        FrameLoop::start(move |ts| animator.borrow_mut().frame(ts))
    };

    *handle.inner.borrow_mut() = Some(Mounted {
        surface,
        animator: Some(animator),
        frame: Some(frame),
        listeners,
    });
    Ok(handle)
}

/// WebGPU when the preset asks for it, Canvas 2D otherwise or as fallback.
async fn create_renderer(
    kind: RendererKind,
    surface: &mut OwnedSurface,
    viewport: Viewport,
) -> Option<Box<dyn FieldRenderer>> {
    if kind == RendererKind::Gpu {
        match gpu_renderer(surface.canvas(), &viewport).await {
            Ok(r) => return Some(Box::new(r)),
            Err(e) => {
                log::warn!("WebGPU unavailable ({e:#}); falling back to canvas 2d");
                if let Err(e) = surface.replace_canvas() {
                    log::warn!("could not replace canvas: {e:?}");
                    return None;
                }
            }
        }
    }
    let viewport = surface.sync_backing_size();
    match RasterRenderer::new(surface.canvas(), &viewport) {
        Ok(r) => Some(Box::new(r)),
        Err(e) => {
            log::warn!("{e:#}; nothing will be drawn");
            None
        }
    }
}

async fn gpu_renderer(
    canvas: &web::HtmlCanvasElement,
    viewport: &Viewport,
) -> anyhow::Result<SurfaceRenderer> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| anyhow!("create_surface: {e}"))?;
    SurfaceRenderer::new(&instance, surface, viewport).await
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}
