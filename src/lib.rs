pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, Spring, System, NVec3};
pub use simulation::forces::{Force, ForceSet, SpringForces, UniformGravity, AirDrag, spring_force, damping_coefficient};
pub use simulation::integrator::{step, substep, flatten_positions};
pub use simulation::params::{Parameters, substeps_per_frame};
pub use simulation::scenario::{SceneKind, SceneData, Ground, build_scene};
pub use simulation::engine::Engine;

pub use configuration::config::{ScenarioConfig, ParametersConfig, SingleSpringConfig, ChainConfig, JelloConfig, ConfigError};

pub use visualization::mssim_vis3d::run_3d;

pub use benchmark::benchmark::{bench_connectivity, bench_frames};
