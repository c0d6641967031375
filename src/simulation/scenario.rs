//! Build and run a fully-initialized hole-field scene
//!
//! Takes a `SceneConfig` (YAML-facing) and produces one owned runtime
//! context (`Scene`) containing:
//! - runtime parameters (`Parameters`)
//! - the simulation world and the particle list
//! - trails, renderable primitives and line connections
//! - the fixed stepper, the force policy and the random source
//!
//! The scene is inserted into Bevy as a `Resource`; the viewer feeds it frame
//! times through [`Scene::tick`] and reads primitives and trails back out.
//! A reset throws the whole context away and builds a new one.

use bevy::prelude::Resource;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{SceneConfig, ShapeConfig};
use crate::error::SimResult;
use crate::simulation::connections::connect;
use crate::simulation::forces::{
    BoundaryShell, CentralAttraction, CentripetalCorrection, FieldSet, ForcePolicy, Respawn,
};
use crate::simulation::integrator::{advance_world, FixedStepper};
use crate::simulation::params::Parameters;
use crate::simulation::registry::{register, Registry};
use crate::simulation::sampler::{load_image_points, sample_points};
use crate::simulation::states::{Body, BodyHandle, NVec3, SolverConfig, World};
use crate::simulation::sync::{mark_trails, sync_primitives, Primitive};
use crate::simulation::trails::Trail;

/// One sampled point paired with the body it seeded
#[derive(Debug, Clone)]
pub struct Particle {
    pub point: NVec3,
    pub body: BodyHandle,
}

/// Result of one [`Scene::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The scene is not mounted yet; nothing was touched
    Skipped,
    Advanced {
        steps: u32,       // fixed steps integrated this frame
        dropped: u32,     // steps discarded by the catch-up cap
        respawned: usize, // recycles by the boundary rule, summed over the steps
    },
}

/// Bevy resource holding everything one running scene owns
#[derive(Resource)]
pub struct Scene {
    pub config: SceneConfig,
    pub parameters: Parameters,
    pub world: World,
    pub points: Vec<NVec3>,
    pub particles: Vec<Particle>,
    pub trails: Vec<Trail>,               // empty when trails are off
    pub primitives: Vec<Primitive>,
    pub connections: Vec<(usize, usize)>, // index pairs into `primitives`
    pub stepper: FixedStepper,
    pub policy: ForcePolicy,
    registry: Option<Registry>,
    rng: StdRng,
    frames: u64,
}

impl Scene {
    /// Validate `cfg`, sample the initial points and allocate per-particle
    /// storage. The world stays empty until [`Scene::mount`].
    pub fn build_scene(cfg: SceneConfig) -> SimResult<Self> {
        cfg.validate()?;

        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let parameters = cfg.parameters();
        let points = sample_scene_points(&cfg, &mut rng)?;

        let trails = if cfg.trails.enabled {
            vec![Trail::new(cfg.trails.length); points.len()]
        } else {
            Vec::new()
        };

        let primitives = points
            .iter()
            .map(|p| Primitive::at(*p, parameters.hole_radius))
            .collect();

        let world = World::new(SolverConfig {
            iterations: parameters.solver_iterations,
        });
        let stepper = FixedStepper::new(parameters.h0, parameters.max_substeps);
        let policy = build_policy(&cfg);

        Ok(Self {
            config: cfg,
            parameters,
            world,
            points,
            particles: Vec::new(),
            trails,
            primitives,
            connections: Vec::new(),
            stepper,
            policy,
            registry: None,
            rng,
            frames: 0,
        })
    }

    /// Build and mount in one go
    pub fn mounted(cfg: SceneConfig) -> SimResult<Self> {
        let mut scene = Self::build_scene(cfg)?;
        scene.mount()?;
        Ok(scene)
    }

    /// Register the container and one body per point. Calling it again on a
    /// mounted scene does nothing.
    pub fn mount(&mut self) -> SimResult<()> {
        if self.registry.is_some() {
            return Ok(());
        }

        let registry = register(&mut self.world, &self.points, &self.parameters, &mut self.rng)?;

        self.particles = self
            .points
            .iter()
            .zip(registry.holes.iter())
            .map(|(p, h)| Particle { point: *p, body: *h })
            .collect();

        if let Some(conn) = &self.config.connections {
            self.connections = connect(&self.points, conn.strategy.into(), conn.probability, &mut self.rng);
        }

        let world = &self.world;
        self.primitives = self
            .particles
            .iter()
            .map(|p| Primitive::from(world.body(p.body)))
            .collect();
        self.registry = Some(registry);

        info!(
            "mounted scene `{}`: {} particles, trails {}, step {:.4}s",
            self.config.name,
            self.particles.len(),
            if self.config.trails.enabled { "on" } else { "off" },
            self.parameters.h0,
        );
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.registry.is_some()
    }

    pub fn container(&self) -> Option<&Body> {
        self.registry.as_ref().map(|r| self.world.body(r.container))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn trails_enabled(&self) -> bool {
        self.config.trails.enabled
    }

    /// Advance the scene by one rendered frame of `delta` seconds.
    ///
    /// Every fixed step first runs the force/boundary policy, then integrates.
    /// Primitive sync and trails follow once per frame. An unmounted scene
    /// skips the frame instead of failing.
    pub fn tick(&mut self, delta: f64) -> FrameOutcome {
        let Scene {
            config,
            parameters,
            world,
            particles,
            trails,
            primitives,
            stepper,
            policy,
            registry,
            rng,
            frames,
            ..
        } = self;

        if registry.is_none() {
            warn!("scene `{}` ticked before mount; skipping frame", config.name);
            return FrameOutcome::Skipped;
        }

        let mut respawned = 0;
        let plan = advance_world(world, stepper, delta, parameters, |world| {
            respawned += policy.apply(world, particles.iter().map(|p| p.body), rng).respawned;
        });

        sync_primitives(world, particles, primitives);

        if config.trails.enabled {
            for (trail, particle) in trails.iter_mut().zip(particles.iter()) {
                trail.push(world.body(particle.body).x);
            }
            mark_trails(trails);
        }

        *frames += 1;
        FrameOutcome::Advanced {
            steps: plan.steps,
            dropped: plan.dropped,
            respawned,
        }
    }

    /// Tear everything down and rebuild from the same configuration
    pub fn reset(&mut self) -> SimResult<()> {
        let fresh = Self::mounted(self.config.clone())?;
        *self = fresh;
        info!("scene `{}` reset", self.config.name);
        Ok(())
    }

    /// Rebuild with trails switched on or off
    pub fn set_trails_enabled(&mut self, enabled: bool) -> SimResult<()> {
        if self.config.trails.enabled == enabled {
            return Ok(());
        }
        let mut cfg = self.config.clone();
        cfg.trails.enabled = enabled;
        *self = Self::mounted(cfg)?;
        Ok(())
    }
}

/// Force policy described by `cfg`; zero-strength terms are left out
pub fn build_policy(cfg: &SceneConfig) -> ForcePolicy {
    let f = &cfg.forces;
    let b = &cfg.boundary;

    let mut field = FieldSet::new();
    if f.strength != 0.0 {
        field = field.with(CentralAttraction {
            strength: f.strength,
            law: f.law.into(),
        });
    }
    if f.centripetal != 0.0 {
        field = field.with(CentripetalCorrection { strength: f.centripetal });
    }

    ForcePolicy {
        shell: BoundaryShell {
            inner: b.inner,
            outer: b.outer,
        },
        respawn: Respawn {
            min: b.respawn_min,
            span: b.respawn_span,
            launch_gain: b.launch_gain,
            launch_bias: b.launch_bias,
        },
        field,
        mode: f.mode.into(),
        force_point: f.force_point(),
        radial_push: f.radial_push,
        min_distance: f.min_distance,
    }
}

fn sample_scene_points(cfg: &SceneConfig, rng: &mut StdRng) -> SimResult<Vec<NVec3>> {
    let extent = cfg.inner_extent();
    match &cfg.sampler.shape {
        ShapeConfig::Image { path, threshold } => load_image_points(path, extent, *threshold),
        shape => Ok(sample_points(shape.volume_shape(), cfg.sampler.num_points, extent, rng)),
    }
}
