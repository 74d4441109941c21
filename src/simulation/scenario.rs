//! Build fully-initialized scenes from configuration
//!
//! Takes a [`SceneKind`] plus a `ScenarioConfig` (YAML-facing) and produces a
//! [`SceneData`] bundle containing:
//! - system state (`System` with particles and springs at t = 0)
//! - the spring edge index list used for line drawing (jello only)
//! - static ground geometry (jello only)
//!
//! Construction is deterministic: building the same scene twice yields
//! identical collections. Scenes are never patched in place; switching or
//! resetting throws the old bundle away and builds a fresh one.

use crate::configuration::config::{ScenarioConfig, SingleSpringConfig, ChainConfig, JelloConfig};
use crate::simulation::states::{System, Particle, Spring, NVec3};
use crate::simulation::forces::damping_coefficient;

/// Preset scenes, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    SingleSpring,
    MultipleSprings,
    Jello,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [SceneKind::SingleSpring, SceneKind::MultipleSprings, SceneKind::Jello];
    pub const COUNT: usize = Self::ALL.len();

    /// Scene at `index`, clamped into `[0, COUNT - 1]`
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::COUNT - 1)]
    }

    pub fn index(self) -> usize {
        match self {
            SceneKind::SingleSpring => 0,
            SceneKind::MultipleSprings => 1,
            SceneKind::Jello => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::SingleSpring => "single spring",
            SceneKind::MultipleSprings => "multiple springs",
            SceneKind::Jello => "jello",
        }
    }
}

/// Static ground quad: 4 vertices (xyz, flattened) and 2 triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

/// Everything one scene needs: simulated state plus render-only geometry
#[derive(Debug, Clone, PartialEq)]
pub struct SceneData {
    pub kind: SceneKind,
    pub system: System,
    pub edges: Vec<u32>, // pairs of particle indices, one pair per spring
    pub ground: Option<Ground>,
}

/// Build the scene `kind` from its section of `cfg`
pub fn build_scene(kind: SceneKind, cfg: &ScenarioConfig) -> SceneData {
    match kind {
        SceneKind::SingleSpring => SceneData {
            kind,
            system: build_single_spring(&cfg.single_spring),
            edges: Vec::new(),
            ground: None,
        },
        SceneKind::MultipleSprings => SceneData {
            kind,
            system: build_chain(&cfg.chain),
            edges: Vec::new(),
            ground: None,
        },
        SceneKind::Jello => {
            let (system, edges) = build_jello(&cfg.jello);
            SceneData {
                kind,
                system,
                edges,
                ground: Some(build_ground(&cfg.jello)),
            }
        }
    }
}

/// Pinned anchor (index 0) and one free particle (index 1)
pub fn build_single_spring(cfg: &SingleSpringConfig) -> System {
    let anchor = Particle::pinned(NVec3::from(cfg.anchor));
    let free = Particle::free(NVec3::from(cfg.position), cfg.mass);

    let spring = Spring {
        a: 0,
        b: 1,
        rest_length: cfg.rest_length,
        stiffness: cfg.stiffness,
        damping: damping_coefficient(cfg.damping_ratio, free.mass, cfg.stiffness),
    };

    System {
        particles: vec![anchor, free],
        springs: vec![spring],
        t: 0.0,
    }
}

/// Pinned anchor followed by `cfg.count` free particles; spring i joins (i, i+1)
///
/// Damping for each link is derived from the mass of `b`, the later particle
/// in the chain. That is always a free particle here because only index 0 is
/// pinned; reordering the chain would break this assumption.
pub fn build_chain(cfg: &ChainConfig) -> System {
    let anchor = Particle::pinned(NVec3::from(cfg.anchor));
    let anchor_y = anchor.x.y;

    let mut particles = Vec::with_capacity(cfg.count + 1);
    let mut springs = Vec::with_capacity(cfg.count);
    particles.push(anchor);

    for i in 0..cfg.count {
        // step right of the previous particle, rising slightly so the chain sags once released
        let prev = particles[i].x;
        let x = NVec3::new(prev.x + cfg.step_x, anchor_y + cfg.rise * i as f64, 0.0);
        let p = Particle::free(x, cfg.mass);

        springs.push(Spring {
            a: i,
            b: i + 1,
            rest_length: cfg.rest_length,
            stiffness: cfg.stiffness,
            damping: damping_coefficient(cfg.damping_ratio, p.mass, cfg.stiffness),
        });
        particles.push(p);
    }

    System {
        particles,
        springs,
        t: 0.0,
    }
}

/// Spacing between neighbouring lattice particles
pub fn cell_size(cfg: &JelloConfig) -> f64 {
    cfg.edge_length / (cfg.width - 1) as f64
}

/// Largest rest-pose distance that still gets a spring: one cell's body diagonal
/// A relative slack of 1e-9 keeps rounding in the lattice coordinates from dropping diagonals
pub fn connection_threshold(cell: f64) -> f64 {
    3.0_f64.sqrt() * cell * (1.0 + 1e-9)
}

/// `width`^3 lattice with a spring between every pair within one cell diagonal
///
/// Returns the system and the flattened edge list `[a0, b0, a1, b1, ...]`,
/// which mirrors `system.springs` pair for pair.
pub fn build_jello(cfg: &JelloConfig) -> (System, Vec<u32>) {
    debug_assert!(cfg.width >= 2, "jello lattice needs at least 2 particles per edge");

    let w = cfg.width;
    let cell = cell_size(cfg);
    let half = cfg.edge_length / 2.0;

    let mut particles = Vec::with_capacity(w * w * w);
    for i in 0..w { // width
        for j in 0..w { // height
            for k in 0..w { // depth
                let x = NVec3::new(
                    cell * i as f64 - half,
                    cell * j as f64 + cfg.lift,
                    -cell * k as f64,
                );
                particles.push(Particle::free(x, cfg.mass));
            }
        }
    }

    let max_dist = connection_threshold(cell);
    let mut springs = Vec::new();
    let mut edges = Vec::new();

    // Loop over each unordered pair (i, j) with i < j
    let n = particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let dist = (particles[i].x - particles[j].x).norm();
            if dist <= max_dist {
                // rest at the measured distance so diagonals keep their natural length
                springs.push(Spring {
                    a: i,
                    b: j,
                    rest_length: dist,
                    stiffness: cfg.stiffness,
                    damping: damping_coefficient(cfg.damping_ratio, particles[j].mass, cfg.stiffness),
                });
                edges.push(i as u32);
                edges.push(j as u32);
            }
        }
    }

    let system = System {
        particles,
        springs,
        t: 0.0,
    };
    (system, edges)
}

/// Square ground quad at `ground_height`, independent of the particles
pub fn build_ground(cfg: &JelloConfig) -> Ground {
    let h = cfg.ground_half_extent as f32;
    let y = cfg.ground_height as f32;
    Ground {
        vertices: vec![
            -h, y, -h,
            -h, y,  h,
             h, y, -h,
             h, y,  h,
        ],
        indices: vec![
            0, 1, 2,
            2, 1, 3,
        ],
    }
}
