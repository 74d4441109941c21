//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of the
//! simulator's tunable constants. A scenario file consists of:
//!
//! - `scene`                  – index of the scene shown at startup (clamped)
//! - [`ParametersConfig`]     – step size, frame rate, gravity, air drag
//! - [`SingleSpringConfig`]   – one pinned anchor and one hanging particle
//! - [`ChainConfig`]          – pinned anchor followed by a chain of particles
//! - [`JelloConfig`]          – lattice cube resting above a ground quad
//!
//! Every field is optional; anything left out takes the built-in default.
//!
//! # YAML format
//!
//! ```yaml
//! scene: 2                  # 0 single spring, 1 chain, 2 jello
//!
//! parameters:
//!   dt: 1.0e-4              # substep size
//!   render_fps: 60.0        # substeps per frame = round((1/fps) / dt)
//!   gravity: [0.0, -9.81, 0.0]
//!   air_damping: 1.0e-4
//!
//! single_spring:
//!   anchor: [0.0, 0.9, 0.0]
//!   position: [0.0, -0.99, 0.0]
//!   mass: 0.01
//!   rest_length: 0.5
//!   stiffness: 0.5
//!   damping_ratio: 1.0
//!
//! chain:
//!   anchor: [0.0, 0.9, 0.0]
//!   count: 10
//!   mass: 0.001
//!   step_x: 0.05
//!   rise: 0.001
//!   rest_length: 0.07
//!   stiffness: 0.8
//!   damping_ratio: 1.0
//!
//! jello:
//!   width: 4
//!   edge_length: 5.0
//!   lift: 5.0
//!   mass: 0.001
//!   stiffness: 1.0
//!   damping_ratio: 1.0
//!   ground_height: -1.0
//!   ground_half_extent: 10.0
//! ```

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Global numerical and physical parameters
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,            // substep size
    pub render_fps: f64,    // rendered frames per second
    pub gravity: [f64; 3],  // gravitational acceleration
    pub air_damping: f64,   // linear drag coefficient, independent of spring damping
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: 1e-4,
            render_fps: 60.0,
            gravity: [0.0, -9.81, 0.0],
            air_damping: 1e-4,
        }
    }
}

/// A pinned anchor with a single free particle hanging from it
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SingleSpringConfig {
    pub anchor: [f64; 3],   // pinned particle
    pub position: [f64; 3], // free particle
    pub mass: f64,          // mass of the free particle
    pub rest_length: f64,
    pub stiffness: f64,
    pub damping_ratio: f64, // fraction of critical damping
}

impl Default for SingleSpringConfig {
    fn default() -> Self {
        Self {
            anchor: [0.0, 0.9, 0.0],
            position: [0.0, -0.99, 0.0],
            mass: 0.01,
            rest_length: 0.5,
            stiffness: 0.5,
            damping_ratio: 1.0,
        }
    }
}

/// A pinned anchor followed by `count` free particles, each tied to the previous one
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChainConfig {
    pub anchor: [f64; 3],
    pub count: usize,       // free particles after the anchor
    pub mass: f64,          // mass of each free particle
    pub step_x: f64,        // x offset from the previous particle
    pub rise: f64,          // y offset per link above the anchor
    pub rest_length: f64,
    pub stiffness: f64,
    pub damping_ratio: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            anchor: [0.0, 0.9, 0.0],
            count: 10,
            mass: 0.001,
            step_x: 0.05,
            rise: 0.001,
            rest_length: 0.07,
            stiffness: 0.8,
            damping_ratio: 1.0,
        }
    }
}

/// A `width`^3 lattice of free particles above a ground quad
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct JelloConfig {
    pub width: usize,            // particles per edge, at least 2
    pub edge_length: f64,        // side length of the whole cube
    pub lift: f64,               // height of the bottom face
    pub mass: f64,               // mass of each particle
    pub stiffness: f64,
    pub damping_ratio: f64,
    pub ground_height: f64,      // y of the ground quad
    pub ground_half_extent: f64, // ground spans [-h, h] in x and z
}

impl Default for JelloConfig {
    fn default() -> Self {
        Self {
            width: 4,
            edge_length: 5.0,
            lift: 5.0,
            mass: 0.001,
            stiffness: 1.0,
            damping_ratio: 1.0,
            ground_height: -1.0,
            ground_half_extent: 10.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub scene: usize,                       // scene shown first
    pub parameters: ParametersConfig,       // global numerical and physical parameters
    pub single_spring: SingleSpringConfig,
    pub chain: ChainConfig,
    pub jello: JelloConfig,
}

impl ScenarioConfig {
    /// Parse a scenario from any YAML source
    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    /// Load a scenario from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let cfg = Self::from_yaml_reader(BufReader::new(file)).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        cfg.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(cfg)
    }

    /// Reject values that would produce NaN positions or an unbounded frame loop
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.parameters;
        if !(p.dt.is_finite() && p.dt > 0.0) {
            return Err(format!("parameters.dt must be positive, got {}", p.dt));
        }
        if !(p.render_fps.is_finite() && p.render_fps > 0.0) {
            return Err(format!("parameters.render_fps must be positive, got {}", p.render_fps));
        }
        if p.dt > 1.0 / p.render_fps {
            return Err(format!("parameters.dt ({}) is longer than one frame", p.dt));
        }

        check_mass("single_spring.mass", self.single_spring.mass)?;
        check_mass("chain.mass", self.chain.mass)?;
        check_mass("jello.mass", self.jello.mass)?;

        if self.jello.width < 2 {
            return Err(format!("jello.width must be at least 2, got {}", self.jello.width));
        }
        if !(self.jello.edge_length.is_finite() && self.jello.edge_length > 0.0) {
            return Err(format!("jello.edge_length must be positive, got {}", self.jello.edge_length));
        }
        Ok(())
    }
}

// zero is allowed and pins the particle
fn check_mass(field: &str, mass: f64) -> Result<(), String> {
    if mass.is_finite() && mass >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be non-negative, got {}", field, mass))
    }
}

/// Errors raised while loading a scenario file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be opened or read
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    /// The file is not a valid scenario document
    Parse {
        path: PathBuf,
        error: serde_yaml::Error,
    },
    /// The file parsed but holds out-of-range values
    Invalid {
        path: PathBuf,
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "failed to read scenario '{}': {}", path.display(), error)
            }
            ConfigError::Parse { path, error } => {
                write!(f, "failed to parse scenario '{}': {}", path.display(), error)
            }
            ConfigError::Invalid { path, reason } => {
                write!(f, "invalid scenario '{}': {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Invalid { .. } => None,
        }
    }
}
