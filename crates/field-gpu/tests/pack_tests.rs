use field_core::config::{Bloom, ClearMode, GlowStyle};
use field_core::{DrawList, FieldCamera, FieldState, Ring, Segment, Sprite, Variant, Viewport};
use field_gpu::helpers::pick_surface_format;
use field_gpu::pack::{
    fade_factor, globals, glow_extent, grow_capacity, pack_lines, pack_points, Globals,
    LineVertex, PointInstance, PostUniforms, MIN_BUFFER_BYTES, RING_SEGMENTS,
};
use glam::Vec3;

#[test]
fn layouts_match_the_shaders() {
    assert_eq!(std::mem::size_of::<Globals>(), 80);
    assert_eq!(std::mem::size_of::<PointInstance>(), 48);
    assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 32);
}

#[test]
fn screen_globals_scale_by_css_pixels() {
    let vp = Viewport::new(800.0, 400.0, 2.0);
    let cam = FieldCamera::screen(&vp);
    let draw = DrawList::new();
    let g = globals(&draw, &cam, &vp);
    assert_eq!(g.scale, [2.0 / 800.0, 2.0 / 400.0]);
}

#[test]
fn volume_globals_follow_the_projection() {
    let vp = Viewport::new(1600.0, 800.0, 1.0);
    let mut field = FieldState::new(Variant::PointCloud.config(), vp, 1).unwrap();
    field.advance(0.0);
    let cam = FieldCamera::for_field(&field, &vp);
    let mut draw = DrawList::new();
    draw.rebuild(&field);
    let g = globals(&draw, &cam, &vp);
    assert!(draw.volume);
    assert!((g.scale[1] - cam.focal).abs() < 1e-6);
    assert!((g.scale[0] - cam.focal / 2.0).abs() < 1e-6);
    assert_eq!(g.drift, 0.5);
}

#[test]
fn glow_extents_are_bounded() {
    assert_eq!(glow_extent(GlowStyle::None, 3.0), 1.0);
    assert_eq!(glow_extent(GlowStyle::Radial(3.0), 3.0), 3.0);
    assert_eq!(glow_extent(GlowStyle::Radial(0.2), 3.0), 1.0);
    assert_eq!(glow_extent(GlowStyle::ShadowBlur(10.0), 5.0), 3.0);
    assert_eq!(glow_extent(GlowStyle::ShadowBlur(1000.0), 1.0), 6.0);
    assert_eq!(glow_extent(GlowStyle::Radial(f32::NAN), 1.0), 1.0);
}

#[test]
fn points_carry_sprite_fields() {
    let sprite = Sprite {
        position: Vec3::new(1.0, 2.0, 3.0),
        size: 2.0,
        color: [0.1, 0.2, 0.3],
        alpha: 0.5,
        glow: GlowStyle::Radial(4.0),
        randomness: Vec3::new(0.5, -0.5, 0.25),
    };
    let mut out = vec![PointInstance {
        position: [9.0; 3],
        size: 9.0,
        color: [9.0; 4],
        randomness: [9.0; 3],
        extent: 9.0,
    }];
    pack_points(&[sprite, sprite], &mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(out[0].color, [0.1, 0.2, 0.3, 0.5]);
    assert_eq!(out[0].extent, 4.0);
    assert_eq!(out[1].randomness, [0.5, -0.5, 0.25]);
}

#[test]
fn lines_pack_segments_then_ring_loops() {
    let seg = Segment {
        from: Vec3::ZERO,
        to: Vec3::new(10.0, 0.0, 0.0),
        from_color: [1.0, 0.0, 0.0, 0.2],
        to_color: [0.0, 0.0, 1.0, 0.1],
        width: 0.5,
    };
    let ring = Ring {
        center: Vec3::new(5.0, 5.0, 0.0),
        radius: 2.0,
        color: [1.0, 1.0, 1.0, 0.5],
        width: 1.0,
    };
    let mut out = Vec::new();
    pack_lines(&[seg], &[ring], &mut out);
    assert_eq!(out.len(), 2 + RING_SEGMENTS * 2);
    assert_eq!(out[0].color, seg.from_color);
    assert_eq!(out[1].color, seg.to_color);
    for v in &out[2..] {
        let d = Vec3::from(v.position) - ring.center;
        assert!((d.length() - 2.0).abs() < 1e-4);
    }
    // the loop closes on its first vertex
    let first = Vec3::from(out[2].position);
    let last = Vec3::from(out[out.len() - 1].position);
    assert!((first - last).length() < 1e-4);
}

#[test]
fn fade_only_for_trail_modes() {
    assert_eq!(fade_factor(ClearMode::Clear), None);
    assert!((fade_factor(ClearMode::Fade(0.05)).unwrap() - 0.05).abs() < 1e-6);
    assert_eq!(fade_factor(ClearMode::Fade(3.0)), Some(1.0));
}

#[test]
fn buffers_grow_geometrically() {
    assert_eq!(grow_capacity(0, 1), MIN_BUFFER_BYTES);
    assert_eq!(grow_capacity(4096, 4000), 4096);
    assert_eq!(grow_capacity(4096, 5000), 8192);
    assert_eq!(grow_capacity(8192, 100_000), 131_072);
}

#[test]
fn post_uniforms_disable_bloom_when_absent() {
    let off = PostUniforms::new((640, 360), None);
    assert_eq!(off.bloom_enabled, 0.0);
    assert_eq!(off.resolution, [640.0, 360.0]);
    let on = PostUniforms::new(
        (640, 360),
        Some(Bloom {
            strength: 1.5,
            threshold: 0.85,
        }),
    );
    assert_eq!(on.bloom_enabled, 1.0);
    assert_eq!(on.bloom_strength, 1.5);
}

#[test]
fn surface_format_prefers_linear_8bit() {
    use wgpu::TextureFormat as F;
    assert_eq!(
        pick_surface_format(&[F::Bgra8UnormSrgb, F::Bgra8Unorm]),
        Some(F::Bgra8Unorm)
    );
    assert_eq!(pick_surface_format(&[F::Rgba16Float]), Some(F::Rgba16Float));
    assert_eq!(pick_surface_format(&[]), None);
}
