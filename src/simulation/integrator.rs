//! Fixed-step time integrator for the mass-spring system
//!
//! Semi-implicit (symplectic) Euler: velocity is updated from the net force
//! before position, which keeps stiff spring systems stable at small `dt`.
//! One rendered frame runs `params.substeps` substeps, then the positions
//! are flattened for the renderer.

use super::states::{System, NVec3};
use super::forces::ForceSet;
use super::params::Parameters;

/// Advance the system by a single substep of size `params.dt`
/// Accumulates all forces, integrates free particles, clears accumulators
pub fn substep(sys: &mut System, forces: &ForceSet, params: &Parameters) {
    if sys.particles.is_empty() { // no particles, return
        return;
    }
    let dt = params.dt;

    // springs, gravity, drag -> net_force
    forces.accumulate_forces(sys);

    for p in sys.particles.iter_mut() {
        if !p.is_pinned() {
            // Kick: v_n+1 = v_n + dt * F / m
            p.v += p.net_force * p.inv_mass * dt;
            // Drift with the new velocity: x_n+1 = x_n + dt * v_n+1
            p.x += p.v * dt;
        }
        p.net_force = NVec3::zeros();
    }

    sys.t += dt;
}

/// Advance the system by one rendered frame (`params.substeps` substeps)
/// and rewrite `out` with the resulting positions
///
/// Only `dt` and `substeps` are read from `params`; gravity and drag come
/// from the terms registered in `forces`.
pub fn step(sys: &mut System, forces: &ForceSet, params: &Parameters, out: &mut Vec<f32>) {
    for _ in 0..params.substeps {
        substep(sys, forces, params);
    }
    flatten_positions(sys, out);
}

/// Copy positions into `out` as `[x0, y0, z0, x1, y1, z1, ...]` in particle order
pub fn flatten_positions(sys: &System, out: &mut Vec<f32>) {
    out.clear();
    out.reserve(3 * sys.particles.len());
    for p in &sys.particles {
        out.extend(p.x.iter().map(|&c| c as f32));
    }
}
