//! Force contributors for the mass-spring engine
//!
//! Defines the `Force` trait and the terms the integrator sums into each
//! particle's `net_force` every substep: damped springs, uniform gravity,
//! and linear air drag

use crate::simulation::states::{System, Spring, NVec3};

/// Components with absolute value below this count as zero
pub const EPSILON: f64 = 1e-5;

/// Component-wise near-zero test used by both spring degeneracy guards
pub fn is_near_zero(v: &NVec3) -> bool {
    v.iter().all(|c| c.abs() < EPSILON)
}

/// Dashpot coefficient scaled from critical damping: `ratio * 2 * sqrt(m * k)`
/// `mass` is the moving endpoint's mass
pub fn damping_coefficient(ratio: f64, mass: f64, stiffness: f64) -> f64 {
    ratio * 2.0 * (mass * stiffness).sqrt()
}

/// Force exerted by `spring` on its `a` endpoint (`b` receives the negation)
///
/// Hooke's law along the separation axis plus a dashpot term that opposes
/// the relative velocity projected onto that axis. Coincident endpoints or a
/// vanishing Hooke force yield zero instead of a NaN direction.
pub fn spring_force(sys: &System, spring: &Spring) -> NVec3 {
    let pa = &sys.particles[spring.a];
    let pb = &sys.particles[spring.b];

    let r = pa.x - pb.x;
    let distance = r.norm();

    // endpoints coincide, no axis to push along
    if is_near_zero(&r) {
        return NVec3::zeros();
    }
    let direction = r / distance;

    // F_a = -k (|r| - L0) r_hat
    let hooke = direction * (-spring.stiffness * (distance - spring.rest_length));
    if is_near_zero(&hooke) {
        return NVec3::zeros();
    }

    // project relative velocity onto the force axis
    let axis = hooke.normalize();
    let rel_v = pa.v - pb.v;
    let damping = axis * (-spring.damping * rel_v.dot(&axis));

    hooke + damping
}

/// Collection of force terms (springs, gravity, drag)
/// Each term implements [`Force`] and adds into `net_force` of every particle
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a force term
    pub fn with(mut self, term: impl Force + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Springs, gravity `g` and air drag `air_damping`, in that order
    pub fn standard(g: NVec3, air_damping: f64) -> Self {
        Self::new()
            .with(SpringForces)
            .with(UniformGravity { g })
            .with(AirDrag { coefficient: air_damping })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Add every term's contribution to each particle's `net_force`
    pub fn accumulate_forces(&self, sys: &mut System) {
        for term in &self.terms {
            term.accumulate(sys);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `net_force` of each particle
pub trait Force {
    fn accumulate(&self, sys: &mut System);
}

/// Damped springs: `+F` on `a`, `-F` on `b`
pub struct SpringForces;

impl Force for SpringForces {
    fn accumulate(&self, sys: &mut System) {
        for i in 0..sys.springs.len() {
            let spring = &sys.springs[i];
            let (a, b) = (spring.a, spring.b);
            let f = spring_force(sys, spring);

            sys.particles[a].net_force += f;
            sys.particles[b].net_force -= f;
        }
    }
}

/// Constant gravitational acceleration, `F = m g`
/// Pinned particles have zero mass and so receive nothing
pub struct UniformGravity {
    pub g: NVec3,
}

impl Force for UniformGravity {
    fn accumulate(&self, sys: &mut System) {
        for p in sys.particles.iter_mut() {
            p.net_force += p.mass * self.g;
        }
    }
}

/// Linear drag, `F = -c v`
pub struct AirDrag {
    pub coefficient: f64,
}

impl Force for AirDrag {
    fn accumulate(&self, sys: &mut System) {
        for p in sys.particles.iter_mut() {
            p.net_force += -self.coefficient * p.v;
        }
    }
}
