//! Core state types for the mass-spring simulation.
//!
//! Defines the particle/spring collections integrated every frame:
//! - `Particle` using `NVec3` (position, velocity, force accumulator)
//! - `Spring` connecting two particles by index
//! - `System` holding both collections and the current simulation time `t`

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub mass: f64, // 0 = pinned
    pub inv_mass: f64, // 1 / mass, unused when pinned
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub net_force: NVec3, // accumulator, cleared every substep
}

impl Particle {
    /// Free particle at rest at `x`
    pub fn free(x: NVec3, mass: f64) -> Self {
        Self {
            mass,
            inv_mass: if mass > 0.0 { mass.recip() } else { 0.0 },
            x,
            v: NVec3::zeros(),
            net_force: NVec3::zeros(),
        }
    }

    /// Immovable particle (zero mass) at `x`
    pub fn pinned(x: NVec3) -> Self {
        Self {
            mass: 0.0,
            inv_mass: 0.0,
            x,
            v: NVec3::zeros(),
            net_force: NVec3::zeros(),
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.mass <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    pub a: usize, // receives +force
    pub b: usize, // receives -force
    pub rest_length: f64,
    pub stiffness: f64, // Hooke's constant
    pub damping: f64, // dashpot coefficient along the spring axis
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct System {
    pub particles: Vec<Particle>,
    pub springs: Vec<Spring>,
    pub t: f64, // time
}

impl System {
    /// Total mechanical energy: kinetic + spring potential + gravitational potential
    pub fn energy(&self, gravity: &NVec3) -> f64 {
        let kinetic: f64 = self.particles.iter()
            .filter(|p| !p.is_pinned())
            .map(|p| 0.5 * p.mass * p.v.norm_squared())
            .sum();

        let elastic: f64 = self.springs.iter()
            .map(|s| {
                let ext = (self.particles[s.a].x - self.particles[s.b].x).norm() - s.rest_length;
                0.5 * s.stiffness * ext * ext
            })
            .sum();

        // U = -m g.x
        let potential: f64 = self.particles.iter()
            .map(|p| -p.mass * gravity.dot(&p.x))
            .sum();

        kinetic + elastic + potential
    }
}
