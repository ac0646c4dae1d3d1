use field_core::config::{Connections, EdgeColor, EdgeStyle, EdgeWidth, ValueRange};
use field_core::draw::resolve_color;
use field_core::{CountRule, DrawList, FieldState, ParticleColor, Variant, Viewport};
use glam::Vec3;

fn hd() -> Viewport {
    Viewport::new(1920.0, 1080.0, 1.0)
}

#[test]
fn edge_alpha_scales_with_strength() {
    let mut config = Variant::Sparse.config();
    config.count = CountRule::Fixed(2);
    config.speed = ValueRange::fixed(0.0);
    config.pointer = None;
    config.connections = Some(Connections {
        threshold: 100.0,
        every_n_frames: 1,
    });
    config.style.edge = EdgeStyle {
        color: EdgeColor::Fixed([1.0, 1.0, 1.0]),
        alpha: 0.4,
        width: EdgeWidth::Strength(2.0),
        fade: true,
    };
    let mut field = FieldState::new(config, hd(), 1).unwrap();
    field.particles_mut()[0].position = Vec3::new(10.0, 10.0, 0.0);
    field.particles_mut()[1].position = Vec3::new(10.0, 60.0, 0.0);
    field.advance(0.0);

    let mut list = DrawList::new();
    list.rebuild(&field);
    assert_eq!(list.sprites.len(), 2);
    assert_eq!(list.segments.len(), 1);
    let seg = list.segments[0];
    assert!((seg.from_color[3] - 0.2).abs() < 1e-6);
    assert!((seg.width - 1.0).abs() < 1e-6);
    assert!(seg.is_solid());
}

#[test]
fn one_sprite_per_particle_without_a_network() {
    for v in [Variant::Ambient, Variant::Aurora, Variant::PointCloud, Variant::Constellation] {
        let mut field = FieldState::new(v.config(), hd(), 3).unwrap();
        field.advance(0.0);
        let mut list = DrawList::new();
        list.rebuild(&field);
        assert_eq!(list.sprites.len(), field.len(), "{v}");
        assert!(list.rings.is_empty());
        assert_eq!(list.segments.len(), field.edges().len());
    }
}

#[test]
fn networks_draw_links_and_pulses() {
    let mut config = Variant::Neuron.config();
    config.network.as_mut().unwrap().initial_pulse_probability = 1.0;
    let mut field = FieldState::new(config, hd(), 5).unwrap();
    field.advance(0.0);
    let net = field.network().unwrap();
    let mut list = DrawList::new();
    list.rebuild(&field);
    assert_eq!(list.segments.len(), net.link_count());
    assert_eq!(list.sprites.len(), field.len() + net.pulses().len());
}

#[test]
fn active_nodes_get_rings() {
    let mut field = FieldState::new(Variant::Synapse.config(), hd(), 5).unwrap();
    field.advance(0.0);
    let at = field.particles()[0].position;
    field.pointer_move(at.x, at.y, 1.0);
    field.advance(16.0);
    let mut list = DrawList::new();
    list.rebuild(&field);
    assert!(!list.rings.is_empty());
    assert!(!list.volume);
}

#[test]
fn hue_offset_rotates_hue_colors_only() {
    let rgb = ParticleColor::Rgb([0.2, 0.4, 0.6]);
    assert_eq!(resolve_color(rgb, 90.0), [0.2, 0.4, 0.6]);
    let hue = ParticleColor::Hue {
        degrees: 0.0,
        lightness: 0.5,
    };
    let shifted = resolve_color(hue, 120.0);
    assert!((shifted[1] - 1.0).abs() < 1e-3);
    assert!(shifted[0] < 1e-3);
}

#[test]
fn rebuild_reuses_and_replaces() {
    let mut field = FieldState::new(Variant::Ambient.config(), hd(), 9).unwrap();
    let mut list = DrawList::new();
    field.advance(0.0);
    list.rebuild(&field);
    let first = list.sprites.len();
    field.reset(Viewport::new(400.0, 300.0, 1.0));
    field.advance(16.0);
    list.rebuild(&field);
    assert!(list.sprites.len() < first);
    assert_eq!(list.sprites.len(), field.len());
}

#[test]
fn unfaded_edges_keep_their_full_alpha() {
    let field = FieldState::new(Variant::ParticleNetwork.config(), hd(), 2).unwrap();
    assert!(!field.edges().is_empty());
    let mut list = DrawList::new();
    list.rebuild(&field);
    assert_eq!(list.segments.len(), field.edges().len());
    for seg in &list.segments {
        assert!((seg.from_color[3] - 0.3).abs() < 1e-6);
        assert_eq!(seg.from_color, seg.to_color);
    }
}
