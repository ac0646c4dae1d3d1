//! Neuron-style pulse networks layered on top of a particle field.
//!
//! Nodes are the field's particles; links are fixed at build time and
//! survive until the next reset. Pulses travel along links as a fraction
//! of the link length.

use fnv::FnvHashSet;
use glam::Vec3;
use rand::seq::index::sample;
use rand::Rng;
use smallvec::SmallVec;

use crate::config::{NetworkConfig, PulseMode, Topology};
use crate::particle::ParticleColor;

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub links: SmallVec<[usize; 6]>,
    active_until: Option<f64>,
    pub phase: f32,
    pub phase_speed: f32,
}

impl Node {
    #[inline]
    pub fn is_active(&self, now_ms: f64) -> bool {
        self.active_until.map_or(false, |t| now_ms <= t)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Pulse {
    pub from: usize,
    pub to: usize,
    /// Fraction of the link travelled, `[0, 1)`.
    pub progress: f32,
    pub speed: f32,
    pub size: f32,
    pub color: ParticleColor,
}

impl Pulse {
    #[inline]
    pub fn position(&self, positions: &[Vec3]) -> Option<Vec3> {
        let a = *positions.get(self.from)?;
        let b = *positions.get(self.to)?;
        Some(a.lerp(b, self.progress))
    }
}

#[derive(Clone, Debug)]
pub struct Network {
    config: NetworkConfig,
    nodes: Vec<Node>,
    pulses: Vec<Pulse>,
    next_auto_ms: Option<f64>,
    now_ms: f64,
}

impl Network {
    pub fn build<R: Rng + ?Sized>(config: NetworkConfig, positions: &[Vec3], rng: &mut R) -> Self {
        let n = positions.len();
        let mut nodes: Vec<Node> = (0..n)
            .map(|_| Node {
                phase: rng.gen::<f32>() * std::f32::consts::TAU,
                phase_speed: config.node_pulse_speed.sample(rng),
                ..Node::default()
            })
            .collect();

        for (i, node) in nodes.iter_mut().enumerate() {
            node.links = match config.topology {
                Topology::RandomK { min, max } => random_links(i, n, rng.gen_range(min..=max.max(min)), rng),
                Topology::NearestK { min, max } => {
                    nearest_links(i, positions, rng.gen_range(min..=max.max(min)))
                }
            };
        }

        let mut net = Self {
            config,
            nodes,
            pulses: Vec::new(),
            next_auto_ms: None,
            now_ms: 0.0,
        };

        if config.initial_pulse_probability > 0.0 {
            for i in 0..net.nodes.len() {
                for k in 0..net.nodes[i].links.len() {
                    if rng.gen::<f32>() < config.initial_pulse_probability {
                        let to = net.nodes[i].links[k];
                        let progress = rng.gen::<f32>();
                        net.spawn_pulse(i, to, progress, rng);
                    }
                }
            }
        }
        log::debug!(
            "network built: {} nodes, {} links, {} pulses",
            net.nodes.len(),
            net.link_count(),
            net.pulses.len()
        );
        net
    }

    #[inline]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Undirected links, each once, as `(a, b)` with `a < b`, sorted.
    pub fn links(&self) -> Vec<(usize, usize)> {
        let mut seen: FnvHashSet<(usize, usize)> = FnvHashSet::default();
        for (i, node) in self.nodes.iter().enumerate() {
            for &j in &node.links {
                seen.insert((i.min(j), i.max(j)));
            }
        }
        let mut out: Vec<_> = seen.into_iter().collect();
        out.sort_unstable();
        out
    }

    pub fn link_count(&self) -> usize {
        self.links().len()
    }

    pub fn is_active(&self, i: usize) -> bool {
        self.nodes.get(i).map_or(false, |n| n.is_active(self.now_ms))
    }

    /// Mark `i` active and send one pulse down each of its links.
    pub fn activate<R: Rng + ?Sized>(&mut self, i: usize, now_ms: f64, rng: &mut R) {
        let Some(node) = self.nodes.get_mut(i) else {
            return;
        };
        node.active_until = Some(now_ms + self.config.active_ms);
        let links = node.links.clone();
        for to in links {
            self.spawn_pulse(i, to, 0.0, rng);
        }
    }

    /// Activate the node nearest to `at` if it lies within the configured
    /// pointer radius. Returns the activated index.
    pub fn activate_near<R: Rng + ?Sized>(
        &mut self,
        positions: &[Vec3],
        at: Vec3,
        now_ms: f64,
        rng: &mut R,
    ) -> Option<usize> {
        let radius = self.config.pointer_radius?;
        let (i, d) = crate::input::nearest_point(positions.iter().copied(), at)?;
        if d < radius {
            self.activate(i, now_ms, rng);
            Some(i)
        } else {
            None
        }
    }

    /// Advance pulses, node phases and timed activation by one frame.
    pub fn update<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        self.now_ms = now_ms;
        for node in &mut self.nodes {
            node.phase = (node.phase + node.phase_speed) % std::f32::consts::TAU;
            if node.active_until.map_or(false, |t| now_ms > t) {
                node.active_until = None;
            }
        }

        let mut arrived: SmallVec<[usize; 16]> = SmallVec::new();
        let mode = self.config.pulse_mode;
        self.pulses.retain_mut(|p| {
            p.progress += p.speed;
            if p.progress < 1.0 {
                return true;
            }
            match mode {
                PulseMode::Looping => {
                    p.progress = 0.0;
                    true
                }
                PulseMode::Cascade => {
                    arrived.push(p.to);
                    false
                }
            }
        });
        for to in arrived {
            if let Some(node) = self.nodes.get_mut(to) {
                node.active_until = Some(now_ms + self.config.active_ms);
            }
        }

        if let Some(every) = self.config.auto_activate_ms {
            match self.next_auto_ms {
                None => self.next_auto_ms = Some(now_ms + every),
                Some(due) if now_ms >= due => {
                    if !self.nodes.is_empty() {
                        let i = rng.gen_range(0..self.nodes.len());
                        self.activate(i, now_ms, rng);
                    }
                    self.next_auto_ms = Some(now_ms + every);
                }
                Some(_) => {}
            }
        }
    }

    fn spawn_pulse<R: Rng + ?Sized>(&mut self, from: usize, to: usize, progress: f32, rng: &mut R) {
        if self.pulses.len() >= self.config.max_pulses {
            return;
        }
        self.pulses.push(Pulse {
            from,
            to,
            progress: progress.clamp(0.0, 0.999),
            speed: self.config.pulse_speed.sample(rng),
            size: self.config.pulse_size.sample(rng),
            color: self.config.pulse_palette.pick(rng, 0.5),
        });
    }
}

fn random_links<R: Rng + ?Sized>(i: usize, n: usize, k: usize, rng: &mut R) -> SmallVec<[usize; 6]> {
    if n < 2 {
        return SmallVec::new();
    }
    let k = k.min(n - 1);
    // sample from n-1 slots and skip over self
    sample(rng, n - 1, k)
        .into_iter()
        .map(|j| if j >= i { j + 1 } else { j })
        .collect()
}

fn nearest_links(i: usize, positions: &[Vec3], k: usize) -> SmallVec<[usize; 6]> {
    let origin = positions[i];
    let mut others: Vec<(usize, f32)> = positions
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(j, p)| (j, origin.distance_squared(*p)))
        .collect();
    others.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    others.into_iter().take(k).map(|(j, _)| j).collect()
}
