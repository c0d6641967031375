use std::time::Instant;

use crate::configuration::config::SceneConfig;
use crate::simulation::scenario::Scene;

const FRAMES: u32 = 240;
const DELTA: f64 = 1.0 / 60.0;

fn bench_scene(num_points: usize, trails: bool) -> Scene {
    let mut cfg = SceneConfig::preset("singularity-trails").expect("built-in preset is valid");
    cfg.sampler.num_points = num_points;
    cfg.trails.enabled = trails;
    cfg.seed = Some(42);
    Scene::mounted(cfg).expect("benchmark scene mounts")
}

/// Average cost of one frame (steps, policy, sync, trails) for growing scenes
pub fn bench_tick() {
    // Different particle counts to test
    let ns = [250, 500, 1000, 2000, 4000, 8000];

    for n in ns {
        let mut scene = bench_scene(n, true);

        // Warm up
        for _ in 0..10 {
            scene.tick(DELTA);
        }

        let t0 = Instant::now();
        for _ in 0..FRAMES {
            scene.tick(DELTA);
        }
        let per_frame = t0.elapsed().as_secs_f64() / FRAMES as f64;

        println!(
            "N = {:5} (sampled {:5}), tick = {:8.6} s, {:5.1}% of frame budget",
            n,
            scene.particles.len(),
            per_frame,
            per_frame / DELTA * 100.0,
        );
    }
}

/// Same scene with and without trails, to isolate the trail buffer cost
pub fn bench_trails() {
    let n = 2000;
    for trails in [false, true] {
        let mut scene = bench_scene(n, trails);

        let t0 = Instant::now();
        for _ in 0..FRAMES {
            scene.tick(DELTA);
        }
        let dt = t0.elapsed().as_secs_f64();

        println!(
            "N = {:5}, trails = {:5}, total = {:8.6} s, per frame = {:8.6} s",
            scene.particles.len(),
            trails,
            dt,
            dt / FRAMES as f64,
        );
    }
}
