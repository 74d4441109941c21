use mssim::{Engine, ScenarioConfig};
use mssim::run_3d;
use mssim::{bench_connectivity, bench_frames};

use clap::Parser;
use anyhow::Result;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, long, default_value = "default.yaml")]
    file_name: String,

    /// Scene shown at startup: 0 single spring, 1 chain, 2 jello
    #[arg(short, long)]
    scene: Option<usize>,

    /// Time the connectivity scan and integration instead of opening a window
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(file_name: &str) -> ScenarioConfig {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    match ScenarioConfig::from_file(&config_path) {
        Ok(cfg) => {
            log::info!("loaded scenario from {}", config_path.display());
            cfg
        }
        Err(e) => {
            log::warn!("{}, using defaults", e);
            ScenarioConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_connectivity();
        bench_frames();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario(&args.file_name);
    if let Some(scene) = args.scene {
        scenario_cfg.scene = scene;
    }

    let engine = Engine::new(scenario_cfg);
    run_3d(engine);

    Ok(())
}
