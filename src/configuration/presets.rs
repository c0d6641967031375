//! Built-in scenes offered by the scene menu.
//!
//! Each key maps to one [`SceneConfig`]; the viewer binds them to the number
//! keys in the order of [`PRESET_KEYS`].

use crate::error::{SimError, SimResult};

use super::config::{
    ApplyModeConfig, BoundaryConfig, ConnectionsConfig, ContainerConfig, EngineConfig, ForceLawConfig,
    ForcesConfig, PairStrategyConfig, SamplerConfig, SceneConfig, ShapeConfig, SpawnConfig, SpawnModeConfig,
    TrailsConfig,
};

pub const PRESET_KEYS: [&str; 5] = [
    "singularity-trails",
    "vortex-trails",
    "singularity",
    "sphere-of-holes",
    "box-of-holes",
];

impl SceneConfig {
    /// Look up a built-in scene by key
    pub fn preset(key: &str) -> SimResult<Self> {
        let cfg = match key {
            "singularity-trails" => singularity_trails(),
            "vortex-trails" => vortex_trails(),
            "singularity" => singularity(),
            "sphere-of-holes" => sphere_of_holes(),
            "box-of-holes" => box_of_holes(),
            _ => return Err(SimError::UnknownScene(key.to_string())),
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Holes launched from far outside, swallowed by the center and relaunched,
/// with an orbital correction and long trails
fn singularity_trails() -> SceneConfig {
    SceneConfig {
        name: "singularity-trails".into(),
        engine: EngineConfig::default(),
        container: ContainerConfig {
            size: 50.0,
            hole_radius: 1.5,
            hole_mass: 0.1,
            container_mass: 1.0,
            friction: 0.0,
            restitution: 0.6,
        },
        sampler: SamplerConfig {
            shape: ShapeConfig::Sphere,
            num_points: 2000,
        },
        spawn: SpawnConfig {
            mode: SpawnModeConfig::Outside,
            spread: 1000.0,
            launch_speed: 1.0,
        },
        forces: ForcesConfig {
            law: ForceLawConfig::InverseSquare,
            strength: 500_000.0,
            mode: ApplyModeConfig::VelocityAndForce,
            centripetal: 1.5,
            radial_push: 0.0,
            force_point: Some([1.0, 10.0, 100.0]),
            min_distance: 1.0e-3,
        },
        boundary: BoundaryConfig {
            inner: 1.0,
            outer: None,
            respawn_min: 100.0,
            respawn_span: 1000.0,
            launch_gain: 1.0,
            launch_bias: 10.0,
        },
        trails: TrailsConfig {
            enabled: true,
            length: 200,
        },
        connections: None,
        seed: None,
    }
}

/// Stronger pull, larger swallow radius and a steady inward push at 75 Hz
fn vortex_trails() -> SceneConfig {
    SceneConfig {
        name: "vortex-trails".into(),
        engine: EngineConfig {
            fixed_step: 1.0 / 75.0,
            ..EngineConfig::default()
        },
        container: ContainerConfig {
            size: 50.0,
            hole_radius: 0.8,
            hole_mass: 0.1,
            container_mass: 1.0,
            friction: 0.0,
            restitution: 0.6,
        },
        sampler: SamplerConfig {
            shape: ShapeConfig::Sphere,
            num_points: 2000,
        },
        spawn: SpawnConfig::default(),
        forces: ForcesConfig {
            law: ForceLawConfig::InverseSquare,
            strength: 1_000_000.0,
            mode: ApplyModeConfig::Velocity,
            centripetal: 0.0,
            radial_push: 10.0,
            force_point: None,
            min_distance: 1.0e-3,
        },
        boundary: BoundaryConfig {
            inner: 5.0,
            outer: None,
            respawn_min: 1000.0,
            respawn_span: 1000.0,
            launch_gain: 1.0,
            launch_bias: 10.0,
        },
        trails: TrailsConfig {
            enabled: true,
            length: 100,
        },
        connections: None,
        seed: None,
    }
}

/// Holes start inside a large sphere and fall inward; escapees come back at
/// the wall
fn singularity() -> SceneConfig {
    SceneConfig {
        name: "singularity".into(),
        engine: EngineConfig::default(),
        container: ContainerConfig {
            size: 100.0,
            hole_radius: 0.8,
            hole_mass: 0.1,
            container_mass: 1.0,
            friction: 0.3,
            restitution: 0.6,
        },
        sampler: SamplerConfig {
            shape: ShapeConfig::Sphere,
            num_points: 2000,
        },
        spawn: SpawnConfig {
            mode: SpawnModeConfig::AtPoint,
            spread: 0.0,
            launch_speed: 0.0,
        },
        forces: ForcesConfig {
            law: ForceLawConfig::InverseLinear,
            strength: 100.0,
            mode: ApplyModeConfig::Velocity,
            ..ForcesConfig::default()
        },
        boundary: BoundaryConfig {
            inner: 1.0,
            outer: Some(1000.0),
            respawn_min: 99.2,
            respawn_span: 0.0,
            launch_gain: 5.0,
            launch_bias: 0.0,
        },
        trails: TrailsConfig::default(),
        connections: None,
        seed: None,
    }
}

/// A still sphere of holes; only bodies pushed beyond the outer shell move
fn sphere_of_holes() -> SceneConfig {
    SceneConfig {
        name: "sphere-of-holes".into(),
        engine: EngineConfig::default(),
        container: ContainerConfig {
            size: 100.0,
            hole_radius: 0.8,
            hole_mass: 0.1,
            container_mass: 1.0,
            friction: 0.3,
            restitution: 0.6,
        },
        sampler: SamplerConfig {
            shape: ShapeConfig::Sphere,
            num_points: 1000,
        },
        spawn: SpawnConfig {
            mode: SpawnModeConfig::AtPoint,
            spread: 0.0,
            launch_speed: 0.0,
        },
        forces: ForcesConfig {
            strength: 0.0,
            mode: ApplyModeConfig::Force,
            ..ForcesConfig::default()
        },
        boundary: BoundaryConfig {
            inner: 0.0,
            outer: Some(1100.0),
            respawn_min: 99.2,
            respawn_span: 0.0,
            launch_gain: 2.0,
            launch_bias: 0.0,
        },
        trails: TrailsConfig::default(),
        connections: None,
        seed: None,
    }
}

/// Holes scattered through a box, randomly paired by line segments
fn box_of_holes() -> SceneConfig {
    SceneConfig {
        name: "box-of-holes".into(),
        engine: EngineConfig::default(),
        container: ContainerConfig {
            size: 100.0,
            hole_radius: 0.8,
            hole_mass: 0.1,
            container_mass: 1.0,
            friction: 0.3,
            restitution: 0.6,
        },
        sampler: SamplerConfig {
            shape: ShapeConfig::Box,
            num_points: 2000,
        },
        spawn: SpawnConfig {
            mode: SpawnModeConfig::AtPoint,
            spread: 0.0,
            launch_speed: 0.0,
        },
        forces: ForcesConfig {
            strength: 0.0,
            mode: ApplyModeConfig::Force,
            ..ForcesConfig::default()
        },
        boundary: BoundaryConfig {
            inner: 0.0,
            outer: None,
            respawn_min: 50.0,
            respawn_span: 0.0,
            launch_gain: 0.0,
            launch_bias: 0.0,
        },
        trails: TrailsConfig::default(),
        connections: Some(ConnectionsConfig {
            strategy: PairStrategyConfig::Random,
            probability: 0.5,
        }),
        seed: None,
    }
}
