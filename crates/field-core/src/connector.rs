use glam::Vec3;

/// Proximity link between two particles, `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// `1 - distance / threshold`, in `(0, 1]`.
    pub strength: f32,
}

/// All pairs closer than `threshold`, in `(a, b)` lexicographic order.
pub fn compute_edges(positions: &[Vec3], threshold: f32) -> Vec<Edge> {
    let mut edges = Vec::new();
    if !(threshold > 0.0) {
        return edges;
    }
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let d = positions[i].distance(positions[j]);
            if d < threshold {
                edges.push(Edge {
                    a: i,
                    b: j,
                    distance: d,
                    strength: 1.0 - d / threshold,
                });
            }
        }
    }
    edges
}

/// Indices connected to `i`.
pub fn neighbors(edges: &[Edge], i: usize) -> impl Iterator<Item = usize> + '_ {
    edges.iter().filter_map(move |e| {
        if e.a == i {
            Some(e.b)
        } else if e.b == i {
            Some(e.a)
        } else {
            None
        }
    })
}

/// Throttled edge recomputation.
#[derive(Clone, Debug)]
pub struct Connector {
    threshold: f32,
    every_n_frames: u32,
    edges: Vec<Edge>,
}

impl Connector {
    pub fn new(threshold: f32, every_n_frames: u32) -> Self {
        Self {
            threshold,
            every_n_frames: every_n_frames.max(1),
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Recompute on every `every_n_frames`-th frame (frame 0 included).
    /// Returns whether a recomputation happened.
    pub fn update(&mut self, frame: u64, positions: &[Vec3]) -> bool {
        if frame % u64::from(self.every_n_frames) == 0 {
            self.recompute(positions);
            true
        } else {
            self.retain_valid(positions.len());
            false
        }
    }

    pub fn recompute(&mut self, positions: &[Vec3]) {
        self.edges = compute_edges(positions, self.threshold);
    }

    /// Drop edges referencing indices that no longer exist.
    pub fn retain_valid(&mut self, len: usize) {
        self.edges.retain(|e| e.b < len);
    }

    /// Re-index after `removed` particles were evicted from the front.
    pub fn evict_front(&mut self, removed: usize) {
        if removed == 0 {
            return;
        }
        self.edges.retain(|e| e.a >= removed);
        for e in &mut self.edges {
            e.a -= removed;
            e.b -= removed;
        }
    }
}
