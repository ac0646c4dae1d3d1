//! `field-native [variant] [key=value ...]`
//!
//! Runs one preset in a desktop window through the GPU renderer. Extra
//! arguments are config overrides, e.g. `particleCount=300 bloom=0`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context};
use field_core::{Animator, FieldConfig, FieldState, Variant, Viewport};
use field_gpu::SurfaceRenderer;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

struct Options {
    variant: Variant,
    config: FieldConfig,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
    let mut variant = Variant::Ambient;
    let mut overrides = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        if let Some((k, v)) = arg.split_once('=') {
            overrides.push((k.to_string(), v.to_string()));
        } else if i == 0 {
            variant = arg.parse()?;
        } else {
            return Err(anyhow!("unexpected argument {arg:?}; expected key=value"));
        }
    }
    let config = variant
        .config()
        .with_overrides(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    Ok(Options { variant, config })
}

fn viewport_of(window: &Window) -> Viewport {
    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<f32>(scale);
    Viewport::new(size.width, size.height, scale as f32)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = parse_args(std::env::args().skip(1)).with_context(|| {
        let names: Vec<_> = Variant::ALL.iter().map(|v| v.name()).collect();
        format!("usage: field-native [{}] [key=value ...]", names.join("|"))
    })?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("Particle field: {}", options.variant.name()))
            .with_inner_size(PhysicalSize::new(1280u32, 720u32))
            .build(&event_loop)?,
    );

    let viewport = viewport_of(&window);
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let renderer = pollster::block_on(SurfaceRenderer::new(&instance, surface, &viewport))?;
    let field = FieldState::new(options.config, viewport, rand::random())?;
    log::info!(
        "running {} with {} particles",
        options.variant.name(),
        field.len()
    );
    let mut animator = Animator::new(field, Box::new(renderer));
    let start = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. },
            ..
        } => animator.resize(viewport_of(&window)),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let p = position.to_logical::<f32>(window.scale_factor());
            animator.pointer_move(p.x, p.y, start.elapsed().as_secs_f64() * 1000.0);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            animator.stop();
            elwt.exit();
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            animator.stop();
            elwt.exit();
        }
        Event::AboutToWait => {
            if animator.frame(start.elapsed().as_secs_f64() * 1000.0) {
                window.request_redraw();
            } else {
                elwt.exit();
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::CountRule;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_ambient() {
        let opts = parse_args(args(&[])).unwrap();
        assert_eq!(opts.variant, Variant::Ambient);
        assert_eq!(opts.config, Variant::Ambient.config());
    }

    #[test]
    fn variant_then_overrides() {
        let opts = parse_args(args(&["neuron", "particleCount=12"])).unwrap();
        assert_eq!(opts.variant, Variant::Neuron);
        assert_eq!(opts.config.count, CountRule::Fixed(12));
    }

    #[test]
    fn overrides_without_variant() {
        let opts = parse_args(args(&["boundary=bounce"])).unwrap();
        assert_eq!(opts.variant, Variant::Ambient);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&["nope"])).is_err());
        assert!(parse_args(args(&["sparse", "extra"])).is_err());
        assert!(parse_args(args(&["sparse", "drag=2"])).is_err());
    }
}
