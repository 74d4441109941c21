use std::time::Instant;
use crate::configuration::config::{JelloConfig, ParametersConfig};
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::step;
use crate::simulation::params::{Parameters, substeps_per_frame};
use crate::simulation::scenario::build_jello;
use crate::simulation::states::NVec3;

/// Jello config with `width` particles per edge, everything else default
fn make_jello(width: usize) -> JelloConfig {
    JelloConfig {
        width,
        ..JelloConfig::default()
    }
}

/// Default frame parameters
fn make_params() -> Parameters {
    let p = ParametersConfig::default();
    Parameters {
        dt: p.dt,
        substeps: substeps_per_frame(p.render_fps, p.dt),
        gravity: NVec3::from(p.gravity),
        air_damping: p.air_damping,
    }
}

/// Time the all-pairs connectivity scan as the lattice grows
pub fn bench_connectivity() {
    // Different lattice widths to test
    let widths = [2, 4, 6, 8, 10, 12];

    for w in widths {
        let cfg = make_jello(w);

        // Warm up
        let _ = build_jello(&cfg);

        let t0 = Instant::now();
        let (sys, _edges) = build_jello(&cfg);
        let elapsed = t0.elapsed().as_secs_f64();

        let n = sys.particles.len();
        println!(
            "W = {w:3}, N = {n:5}, pairs = {:8}, springs = {:6}, build = {:8.6} s",
            n * (n - 1) / 2,
            sys.springs.len(),
            elapsed
        );
    }
}

/// Time one rendered frame of integration per lattice width
/// Paste output directly into a spreadsheet to graph
pub fn bench_frames() {
    let params = make_params();
    let forces = ForceSet::standard(params.gravity, params.air_damping);
    let frames = 5;

    println!("W,springs,frame_ms");

    for w in 2..=10 {
        let (mut sys, _) = build_jello(&make_jello(w));
        let mut out = Vec::new();

        // Warm-up one frame
        step(&mut sys, &forces, &params, &mut out);

        let t0 = Instant::now();
        for _ in 0..frames {
            step(&mut sys, &forces, &params, &mut out);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / frames as f64;

        println!("{},{},{:.6}", w, sys.springs.len(), ms);
    }
}
