//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - substep size `dt` and number of substeps per rendered frame,
//! - constant gravity acceleration,
//! - linear air drag coefficient (independent of per-spring damping)

use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // substep size
    pub substeps: usize, // substeps per rendered frame
    pub gravity: NVec3, // gravitational acceleration
    pub air_damping: f64, // drag force = -air_damping * v
}

/// Number of fixed `dt` substeps needed to cover one frame at `render_fps`
pub fn substeps_per_frame(render_fps: f64, dt: f64) -> usize {
    ((1.0 / render_fps) / dt).round() as usize
}
