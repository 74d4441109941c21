//! High-level runtime engine
//!
//! `Engine` is the single owner of everything tied to the active scene: the
//! particle/spring system, its render-only geometry, and the flattened
//! position buffer handed to the renderer. Switching or resetting a scene
//! drops the old `SceneData` wholesale and builds a new one.

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::{step, flatten_positions};
use crate::simulation::params::{Parameters, substeps_per_frame};
use crate::simulation::scenario::{SceneKind, SceneData, build_scene};
use crate::simulation::states::NVec3;

/// Bevy resource driving the simulation, one frame per `update`
#[derive(Resource)]
pub struct Engine {
    pub config: ScenarioConfig,
    parameters: Parameters,
    forces: ForceSet, // built from `parameters` once; gravity and drag live here
    pub scene: SceneData,
    positions: Vec<f32>, // 3 floats per particle, particle order
}

impl Engine {
    pub fn new(config: ScenarioConfig) -> Self {
        let p_cfg = &config.parameters;
        let gravity = NVec3::from(p_cfg.gravity);
        let parameters = Parameters {
            dt: p_cfg.dt,
            substeps: substeps_per_frame(p_cfg.render_fps, p_cfg.dt),
            gravity,
            air_damping: p_cfg.air_damping,
        };

        // gravity and drag are fixed for the engine's lifetime
        let forces = ForceSet::standard(parameters.gravity, parameters.air_damping);

        let kind = SceneKind::from_index(config.scene);
        let scene = build_scene(kind, &config);
        let mut positions = Vec::new();
        flatten_positions(&scene.system, &mut positions);

        log::info!(
            "engine: dt = {}, {} substeps per frame, starting with {}",
            parameters.dt, parameters.substeps, kind.name()
        );

        Self {
            config,
            parameters,
            forces,
            scene,
            positions,
        }
    }

    /// Step size and substep count, fixed at construction
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Force terms every substep sums; gravity and drag were copied in from `parameters`
    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    pub fn current(&self) -> SceneKind {
        self.scene.kind
    }

    /// Switch to the scene at `index`, clamped to the valid range
    pub fn select(&mut self, index: usize) {
        self.rebuild(SceneKind::from_index(index));
    }

    /// Move one scene forward, staying on the last one
    pub fn next_scene(&mut self) {
        self.select(self.current().index() + 1);
    }

    /// Move one scene back, staying on the first one
    pub fn previous_scene(&mut self) {
        self.select(self.current().index().saturating_sub(1));
    }

    /// Rebuild the current scene from its initial configuration
    pub fn reset(&mut self) {
        self.rebuild(self.current());
    }

    fn rebuild(&mut self, kind: SceneKind) {
        self.scene = build_scene(kind, &self.config);
        flatten_positions(&self.scene.system, &mut self.positions);
        log::info!(
            "scene: {} ({} particles, {} springs)",
            kind.name(),
            self.scene.system.particles.len(),
            self.scene.system.springs.len()
        );
    }

    /// Advance one rendered frame and refresh the position buffer
    pub fn update(&mut self) {
        let Engine { scene, parameters, forces, positions, .. } = self;
        step(&mut scene.system, forces, parameters, positions);
        log::trace!("frame: t = {:.4}", scene.system.t);
    }

    /// Flattened positions for the renderer
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }
}
