//! GPU renderer for particle fields.
//!
//! Every frame the field is flattened into a [`DrawList`], packed into
//! instance and vertex buffers, drawn into a persistent HDR target and
//! composited onto the surface through an optional bloom chain.

pub mod helpers;
pub mod pack;
mod post;
mod scene;
mod targets;

use anyhow::anyhow;
use field_core::{DrawList, FieldCamera, FieldRenderer, FieldState, Viewport};

use pack::{LineVertex, PointInstance, PostUniforms};
use post::{blit, create_post_resources, PostBindGroups, PostResources};
use scene::ScenePipelines;
use targets::RenderTargets;

struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    scene: ScenePipelines,
}

impl Gpu {
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(&self.device, width, height);
        self.post_groups = PostBindGroups::new(&self.device, &self.post, &self.targets);
        log::debug!("gpu targets resized to {width}x{height}");
    }

    fn destroy(&self) {
        self.targets.destroy();
        self.scene.destroy();
        self.post.uniform_buffer.destroy();
    }
}

/// [`FieldRenderer`] over a configured `wgpu` surface.
pub struct SurfaceRenderer {
    gpu: Option<Gpu>,
    draw: DrawList,
    points: Vec<PointInstance>,
    lines: Vec<LineVertex>,
}

impl SurfaceRenderer {
    /// Acquire an adapter and device for `surface` and build all pipelines.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        viewport: &Viewport,
    ) -> anyhow::Result<Self> {
        let (width, height) = viewport.backing_size();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow!("request_device error: {e:?}"))?;
        let caps = surface.get_capabilities(&adapter);
        let format = helpers::pick_surface_format(&caps.formats)
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(field_core::POST_WGSL.into()),
        });
        let post = create_post_resources(&device, &post_shader, format);
        let targets = RenderTargets::new(&device, width, height);
        let post_groups = PostBindGroups::new(&device, &post, &targets);
        let scene = ScenePipelines::new(&device);
        log::info!("gpu renderer ready: {format:?} {width}x{height}");

        Ok(Self {
            gpu: Some(Gpu {
                surface,
                device,
                queue,
                config,
                targets,
                post,
                post_groups,
                scene,
            }),
            draw: DrawList::new(),
            points: Vec::new(),
            lines: Vec::new(),
        })
    }
}

impl FieldRenderer for SurfaceRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        if let Some(gpu) = self.gpu.as_mut() {
            let (w, h) = viewport.backing_size();
            gpu.resize(w, h);
        }
    }

    fn render(&mut self, field: &FieldState) -> anyhow::Result<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };
        let viewport = *field.viewport();
        self.draw.rebuild(field);
        let camera = FieldCamera::for_field(field, &viewport);
        let globals = pack::globals(&self.draw, &camera, &viewport);
        pack::pack_points(&self.draw.sprites, &mut self.points);
        pack::pack_lines(&self.draw.segments, &self.draw.rings, &mut self.lines);

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(anyhow!("GPU out of memory")),
            Err(e) => {
                log::warn!("skipping frame: {e}");
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    gpu.surface.configure(&gpu.device, &gpu.config);
                }
                return Ok(());
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.scene
            .upload(&gpu.device, &gpu.queue, &globals, &self.points, &self.lines);
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });

        let fade = pack::fade_factor(self.draw.clear);
        {
            let load = match fade {
                Some(_) => wgpu::LoadOp::Load,
                None => wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &gpu.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(f) = fade {
                rpass.set_pipeline(&gpu.post.fade_pipeline);
                rpass.set_blend_constant(wgpu::Color {
                    r: f,
                    g: f,
                    b: f,
                    a: f,
                });
                rpass.draw(0..3, 0..1);
            }
            gpu.scene.draw(&mut rpass);
        }

        let bloom = field.config().style.bloom;
        let mut post = PostUniforms::new(gpu.targets.bloom_size, bloom);
        if bloom.is_some() {
            gpu.queue
                .write_buffer(&gpu.post.uniform_buffer, 0, bytemuck::bytes_of(&post));
            blit(
                &mut encoder,
                "bright_pass",
                &gpu.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &gpu.post.bright_pipeline,
                &gpu.post_groups.hdr,
                None,
            );
            // Queued uniform writes apply at the next submit, so each post stage is submitted on its own
            post.blur_dir = [1.0, 0.0];
            submit_with_uniforms(gpu, encoder, &post);
            encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("blur_h_encoder"),
                });
            blit(
                &mut encoder,
                "blur_h",
                &gpu.targets.bloom_b_view,
                wgpu::Color::BLACK,
                &gpu.post.blur_pipeline,
                &gpu.post_groups.from_bloom_a,
                None,
            );
            post.blur_dir = [0.0, 1.0];
            submit_with_uniforms(gpu, encoder, &post);
            encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("blur_v_encoder"),
                });
            blit(
                &mut encoder,
                "blur_v",
                &gpu.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &gpu.post.blur_pipeline,
                &gpu.post_groups.from_bloom_b,
                None,
            );
            post.blur_dir = [0.0, 0.0];
            submit_with_uniforms(gpu, encoder, &post);
            encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("composite_encoder"),
                });
        } else {
            gpu.queue
                .write_buffer(&gpu.post.uniform_buffer, 0, bytemuck::bytes_of(&post));
        }
        blit(
            &mut encoder,
            "composite",
            &view,
            wgpu::Color::BLACK,
            &gpu.post.composite_pipeline,
            &gpu.post_groups.hdr,
            Some(&gpu.post_groups.bloom_a_only),
        );
        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
            log::info!("gpu renderer disposed");
        }
        self.points = Vec::new();
        self.lines = Vec::new();
        self.draw = DrawList::new();
    }

    fn is_disposed(&self) -> bool {
        self.gpu.is_none()
    }
}

/// Submit `encoder`, then stage `post` for the passes recorded after it.
fn submit_with_uniforms(gpu: &Gpu, encoder: wgpu::CommandEncoder, post: &PostUniforms) {
    gpu.queue.submit(Some(encoder.finish()));
    gpu.queue
        .write_buffer(&gpu.post.uniform_buffer, 0, bytemuck::bytes_of(post));
}
