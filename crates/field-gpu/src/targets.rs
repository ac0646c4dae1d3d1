use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets for the field pipeline.
///
/// `hdr_*` holds the scene at full resolution and persists between frames
/// so fading trails can accumulate. `bloom_*` are half-resolution
/// ping-pong buffers for the bright pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) bloom_size: (u32, u32),
}

fn attachment_usage() -> wgpu::TextureUsages {
    wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, attachment_usage());
        let bloom_size = half(width, height);
        let (bloom_a, bloom_a_view) = helpers::create_color_texture(
            device,
            "bloom_a",
            bloom_size.0,
            bloom_size.1,
            HDR_FORMAT,
            attachment_usage(),
        );
        let (bloom_b, bloom_b_view) = helpers::create_color_texture(
            device,
            "bloom_b",
            bloom_size.0,
            bloom_size.1,
            HDR_FORMAT,
            attachment_usage(),
        );
        Self {
            hdr_tex,
            hdr_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
            bloom_size,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.destroy();
        *self = Self::new(device, width, height);
    }

    pub(crate) fn destroy(&self) {
        self.hdr_tex.destroy();
        self.bloom_a.destroy();
        self.bloom_b.destroy();
    }
}

fn half(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}
