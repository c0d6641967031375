use holefield::{SceneConfig, Scene, FrameOutcome, PRESET_KEYS};
use holefield::run_viewer;
use holefield::{bench_tick, bench_trails};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Built-in scene to run
    #[arg(short, long, default_value = "singularity-trails")]
    scene: String,

    /// Scene file under `scenarios/` (takes precedence over --scene)
    #[arg(short, long)]
    file: Option<String>,

    /// Force trails on
    #[arg(long, conflicts_with = "no_trails")]
    trails: bool,

    /// Force trails off
    #[arg(long)]
    no_trails: bool,

    /// Seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many 60 Hz frames without a window and print a summary
    #[arg(long)]
    headless: Option<u64>,

    /// Print frame timings and exit
    #[arg(long)]
    bench: bool,

    /// List the built-in scenes and exit
    #[arg(long)]
    list: bool,
}

// load here to keep main clean
fn load_scene_config(args: &Args) -> Result<SceneConfig> {
    let mut cfg = match &args.file {
        Some(file_name) => {
            let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
            SceneConfig::from_path(&config_path)
                .with_context(|| format!("failed to load scene file {}", config_path.display()))?
        }
        None => SceneConfig::preset(&args.scene)
            .with_context(|| format!("available scenes: {}", PRESET_KEYS.join(", ")))?,
    };

    if args.trails {
        cfg.trails.enabled = true;
    }
    if args.no_trails {
        cfg.trails.enabled = false;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;

    Ok(cfg)
}

fn run_headless(scene: &mut Scene, frames: u64) -> Result<()> {
    let delta = 1.0 / 60.0;
    let mut steps = 0u64;
    let mut respawned = 0usize;

    for _ in 0..frames {
        match scene.tick(delta) {
            FrameOutcome::Advanced { steps: s, respawned: r, .. } => {
                steps += s as u64;
                respawned += r;
            }
            FrameOutcome::Skipped => bail!("scene was not mounted"),
        }
    }

    info!(
        "headless run: {} frames, {} steps, {} respawns, t = {:.3}s",
        frames, steps, respawned, scene.world.t
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        for key in PRESET_KEYS {
            println!("{key}");
        }
        return Ok(());
    }

    if args.bench {
        bench_tick();
        bench_trails();
        return Ok(());
    }

    let cfg = load_scene_config(&args)?;

    match args.headless {
        Some(frames) => {
            // Bevy installs its own logger in viewer mode
            env_logger::init();
            let mut scene = Scene::mounted(cfg)?;
            run_headless(&mut scene, frames)?;
        }
        None => {
            let scene = Scene::mounted(cfg)?;
            run_viewer(scene);
        }
    }

    Ok(())
}
