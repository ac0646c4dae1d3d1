use field_core::connector::{compute_edges, neighbors, Connector};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn scatter(seed: u64, n: usize) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vec3::new(rng.gen::<f32>() * 500.0, rng.gen::<f32>() * 400.0, 0.0))
        .collect()
}

#[test]
fn fifty_apart_with_threshold_hundred_gives_half_strength() {
    let edges = compute_edges(&[Vec3::ZERO, Vec3::new(30.0, 40.0, 0.0)], 100.0);
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].distance, 50.0);
    assert!((edges[0].strength - 0.5).abs() < 1e-6);
}

#[test]
fn every_edge_satisfies_the_distance_predicate() {
    let pts = scatter(1, 150);
    let threshold = 70.0;
    let edges = compute_edges(&pts, threshold);
    assert!(!edges.is_empty());
    for e in &edges {
        assert!(e.a < e.b);
        let d = pts[e.a].distance(pts[e.b]);
        assert!(d < threshold);
        assert!(e.strength > 0.0 && e.strength <= 1.0);
    }
    // and every close pair is present
    let mut expected = 0;
    for i in 0..pts.len() {
        for j in (i + 1)..pts.len() {
            if pts[i].distance(pts[j]) < threshold {
                expected += 1;
            }
        }
    }
    assert_eq!(edges.len(), expected);
}

#[test]
fn recomputation_is_idempotent_and_order_independent() {
    let pts = scatter(9, 120);
    let a = compute_edges(&pts, 90.0);
    let b = compute_edges(&pts, 90.0);
    assert_eq!(a, b);

    // reversing the collection yields the same pairs of points
    let n = pts.len();
    let reversed: Vec<Vec3> = pts.iter().rev().copied().collect();
    let mut mapped: Vec<(usize, usize)> = compute_edges(&reversed, 90.0)
        .iter()
        .map(|e| {
            let (x, y) = (n - 1 - e.a, n - 1 - e.b);
            (x.min(y), x.max(y))
        })
        .collect();
    mapped.sort_unstable();
    let original: Vec<(usize, usize)> = a.iter().map(|e| (e.a, e.b)).collect();
    assert_eq!(mapped, original);
}

#[test]
fn non_positive_threshold_yields_nothing() {
    let pts = scatter(2, 10);
    assert!(compute_edges(&pts, 0.0).is_empty());
    assert!(compute_edges(&pts, -5.0).is_empty());
}

#[test]
fn throttled_connector_keeps_previous_edges_between_updates() {
    let mut c = Connector::new(100.0, 10);
    let close = [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
    let far = [Vec3::ZERO, Vec3::new(500.0, 0.0, 0.0)];
    assert!(c.update(0, &close));
    assert_eq!(c.edges().len(), 1);
    for frame in 1..10 {
        assert!(!c.update(frame, &far));
        assert_eq!(c.edges().len(), 1);
    }
    assert!(c.update(10, &far));
    assert!(c.edges().is_empty());
}

#[test]
fn stale_indices_are_dropped_between_updates() {
    let mut c = Connector::new(100.0, 5);
    let pts = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)];
    c.update(0, &pts);
    assert_eq!(c.edges().len(), 3);
    c.update(1, &pts[..2]);
    assert_eq!(c.edges().len(), 1);
    assert_eq!((c.edges()[0].a, c.edges()[0].b), (0, 1));
}

#[test]
fn front_eviction_reindexes_edges() {
    let mut c = Connector::new(100.0, 1);
    let pts = [
        Vec3::ZERO,
        Vec3::new(500.0, 0.0, 0.0),
        Vec3::new(510.0, 0.0, 0.0),
    ];
    c.recompute(&pts);
    assert_eq!(c.edges().len(), 2);
    c.evict_front(1);
    assert_eq!(c.edges().len(), 1);
    assert_eq!((c.edges()[0].a, c.edges()[0].b), (0, 1));
}

#[test]
fn neighbors_are_symmetric() {
    let pts = scatter(4, 60);
    let edges = compute_edges(&pts, 80.0);
    for i in 0..pts.len() {
        for j in neighbors(&edges, i) {
            assert!(neighbors(&edges, j).any(|k| k == i));
        }
    }
}
