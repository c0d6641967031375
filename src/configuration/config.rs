//! Configuration types for loading hole-field scenes from YAML.
//!
//! A scene is described by one [`SceneConfig`]:
//!
//! - [`EngineConfig`]    – fixed step, catch-up cap, solver and damping
//! - [`ContainerConfig`] – container size, hole size/mass, contact material
//! - [`SamplerConfig`]   – point layout (sphere, box or image) and count
//! - [`SpawnConfig`]     – where holes start when the scene mounts
//! - [`ForcesConfig`]    – the in-bounds field (attraction, centripetal, mode)
//! - [`BoundaryConfig`]  – legal shell and respawn range
//! - [`TrailsConfig`]    – per-particle trail toggle and length
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   fixed_step: 0.016666667   # seconds per physics step
//!   max_substeps: 8           # catch-up cap per frame
//!
//! container:
//!   size: 50.0
//!   hole_radius: 1.5
//!   friction: 0.0
//!   restitution: 0.6
//!
//! sampler:
//!   shape: { kind: sphere }   # or { kind: box } / { kind: image, path: mask.png } (relative to the file)
//!   num_points: 2000
//!
//! spawn:
//!   mode: outside
//!   spread: 1000.0
//!
//! forces:
//!   law: inverse_square
//!   strength: 500000.0
//!   mode: velocity_and_force
//!   centripetal: 1.5
//!   force_point: [1.0, 10.0, 100.0]
//!
//! boundary:
//!   inner: 1.0
//!   respawn_min: 100.0
//!   respawn_span: 1000.0
//!   launch_bias: 10.0
//!
//! trails:
//!   enabled: true
//!   length: 200
//!
//! seed: 42                    # omit for a different layout every run
//! ```
//!
//! Every section except `container`, `sampler` and `boundary` can be left
//! out and falls back to its `Default`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::simulation::connections::PairStrategy;
use crate::simulation::forces::{ApplyMode, ForceLaw};
use crate::simulation::params::{Parameters, SpawnMode};
use crate::simulation::sampler::{Shape, DEFAULT_BRIGHTNESS_THRESHOLD};
use crate::simulation::states::NVec3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub fixed_step: f64,       // physics step in seconds (1/60 or 1/75 in the shipped scenes)
    pub max_substeps: u32,     // steps allowed per frame before excess time is dropped
    pub solver_iterations: u32,
    pub linear_damping: f64,
    pub angular_damping: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_step: 1.0 / 60.0,
            max_substeps: 8,
            solver_iterations: 10,
            linear_damping: 0.01,
            angular_damping: 0.01,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContainerConfig {
    pub size: f64,            // sphere radius, or box edge length
    pub hole_radius: f64,
    #[serde(default = "default_hole_mass")]
    pub hole_mass: f64,
    #[serde(default = "default_container_mass")]
    pub container_mass: f64,
    #[serde(default)]
    pub friction: f64,
    #[serde(default = "default_restitution")]
    pub restitution: f64,
}

fn default_hole_mass() -> f64 {
    0.1
}

fn default_container_mass() -> f64 {
    1.0
}

fn default_restitution() -> f64 {
    0.6
}

/// Volume the initial points are drawn from
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Sphere,
    Box,
    /// Dark pixels of an image mapped onto the inner sphere
    Image {
        path: PathBuf,
        #[serde(default = "default_threshold")]
        threshold: u8,
    },
}

fn default_threshold() -> u8 {
    DEFAULT_BRIGHTNESS_THRESHOLD
}

impl ShapeConfig {
    /// Shape used for the sampling volume; image layouts live on a sphere
    pub fn volume_shape(&self) -> Shape {
        match self {
            ShapeConfig::Box => Shape::Box,
            ShapeConfig::Sphere | ShapeConfig::Image { .. } => Shape::Sphere,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    pub shape: ShapeConfig,
    #[serde(default = "default_num_points")]
    pub num_points: usize, // ignored by image layouts
}

fn default_num_points() -> usize {
    2000
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpawnModeConfig {
    Outside,
    AtPoint,
}

impl From<SpawnModeConfig> for SpawnMode {
    fn from(m: SpawnModeConfig) -> Self {
        match m {
            SpawnModeConfig::Outside => SpawnMode::Outside,
            SpawnModeConfig::AtPoint => SpawnMode::AtPoint,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub mode: SpawnModeConfig,
    pub spread: f64,       // random extra distance past the container wall
    pub launch_speed: f64, // initial outward speed
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mode: SpawnModeConfig::Outside,
            spread: 1000.0,
            launch_speed: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForceLawConfig {
    InverseLinear,
    InverseSquare,
}

impl From<ForceLawConfig> for ForceLaw {
    fn from(l: ForceLawConfig) -> Self {
        match l {
            ForceLawConfig::InverseLinear => ForceLaw::InverseLinear,
            ForceLawConfig::InverseSquare => ForceLaw::InverseSquare,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplyModeConfig {
    Velocity,
    Force,
    VelocityAndForce,
}

impl From<ApplyModeConfig> for ApplyMode {
    fn from(m: ApplyModeConfig) -> Self {
        match m {
            ApplyModeConfig::Velocity => ApplyMode::Velocity,
            ApplyModeConfig::Force => ApplyMode::Force,
            ApplyModeConfig::VelocityAndForce => ApplyMode::VelocityAndForce,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ForcesConfig {
    pub law: ForceLawConfig,
    pub strength: f64,                 // 0 disables the central pull
    pub mode: ApplyModeConfig,
    pub centripetal: f64,              // 0 disables the orbital correction
    pub radial_push: f64,              // constant force toward the center
    pub force_point: Option<[f64; 3]>, // application point relative to the body
    pub min_distance: f64,             // below this the body is left alone
}

impl Default for ForcesConfig {
    fn default() -> Self {
        Self {
            law: ForceLawConfig::InverseSquare,
            strength: 500_000.0,
            mode: ApplyModeConfig::Velocity,
            centripetal: 0.0,
            radial_push: 0.0,
            force_point: None,
            min_distance: 1.0e-3,
        }
    }
}

impl ForcesConfig {
    pub fn force_point(&self) -> Option<NVec3> {
        self.force_point.map(|[x, y, z]| NVec3::new(x, y, z))
    }
}

/// Legal shell and respawn range. A body is recycled when
/// `|x| + hole_radius <= inner` or `|x| + hole_radius > outer`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoundaryConfig {
    #[serde(default)]
    pub inner: f64,
    #[serde(default)]
    pub outer: Option<f64>,
    pub respawn_min: f64,
    #[serde(default)]
    pub respawn_span: f64,
    #[serde(default = "default_launch_gain")]
    pub launch_gain: f64,
    #[serde(default)]
    pub launch_bias: f64,
}

fn default_launch_gain() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrailsConfig {
    pub enabled: bool,
    pub length: usize,
}

impl Default for TrailsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            length: 200,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PairStrategyConfig {
    Random,
    Closest,
    Farthest,
}

impl From<PairStrategyConfig> for PairStrategy {
    fn from(s: PairStrategyConfig) -> Self {
        match s {
            PairStrategyConfig::Random => PairStrategy::Random,
            PairStrategyConfig::Closest => PairStrategy::Closest,
            PairStrategyConfig::Farthest => PairStrategy::Farthest,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConnectionsConfig {
    pub strategy: PairStrategyConfig,
    #[serde(default = "default_probability")]
    pub probability: f64,
}

fn default_probability() -> f64 {
    0.5
}

/// Top-level scene configuration loaded from YAML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub engine: EngineConfig,
    pub container: ContainerConfig,
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub forces: ForcesConfig,
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub trails: TrailsConfig,
    #[serde(default)]
    pub connections: Option<ConnectionsConfig>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        let cfg: SceneConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a scene file. A relative image path inside it is taken relative
    /// to the file's own directory, not the working directory.
    pub fn from_path(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_yaml_str(&text)?;

        if let (ShapeConfig::Image { path: image, .. }, Some(dir)) = (&mut cfg.sampler.shape, path.parent()) {
            if image.is_relative() {
                *image = dir.join(&*image);
            }
        }
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Sampling extent: inner sphere radius, or half the inner box edge
    pub fn inner_extent(&self) -> f64 {
        self.sampler
            .shape
            .volume_shape()
            .inner_extent(self.container.size, self.container.hole_radius)
    }

    /// Check the numeric ranges the simulation relies on.
    ///
    /// In particular the whole respawn range must sit inside the legal shell,
    /// so a recycled body is legal again on the very next check.
    pub fn validate(&self) -> SimResult<()> {
        let e = &self.engine;
        let c = &self.container;
        let b = &self.boundary;

        ensure(e.fixed_step.is_finite() && e.fixed_step > 0.0, "engine.fixed_step must be positive")?;
        ensure(e.max_substeps >= 1, "engine.max_substeps must be at least 1")?;
        ensure((0.0..=1.0).contains(&e.linear_damping), "engine.linear_damping must lie in [0, 1]")?;
        ensure((0.0..=1.0).contains(&e.angular_damping), "engine.angular_damping must lie in [0, 1]")?;

        ensure(c.hole_radius > 0.0, "container.hole_radius must be positive")?;
        ensure(c.hole_mass > 0.0, "container.hole_mass must be positive")?;
        ensure(c.size > 2.0 * c.hole_radius, "container.size must exceed one hole diameter")?;
        ensure(c.friction >= 0.0, "container.friction must not be negative")?;
        ensure(c.restitution >= 0.0, "container.restitution must not be negative")?;

        if !matches!(self.sampler.shape, ShapeConfig::Image { .. }) {
            ensure(self.sampler.num_points > 0, "sampler.num_points must be positive")?;
        }

        ensure(
            all_finite(&[self.spawn.spread, self.spawn.launch_speed]),
            "spawn values must be finite",
        )?;
        ensure(self.spawn.spread >= 0.0, "spawn.spread must not be negative")?;

        let f = &self.forces;
        let point = f.force_point.unwrap_or_default();
        ensure(
            all_finite(&[f.strength, f.centripetal, f.radial_push, f.min_distance]) && all_finite(&point),
            "forces values must be finite",
        )?;
        ensure(f.min_distance > 0.0, "forces.min_distance must be positive")?;

        ensure(
            all_finite(&[b.inner, b.respawn_min, b.respawn_span, b.launch_gain, b.launch_bias])
                && b.outer.map_or(true, f64::is_finite),
            "boundary values must be finite",
        )?;
        ensure(b.respawn_span >= 0.0, "boundary.respawn_span must not be negative")?;
        ensure(
            b.respawn_min + c.hole_radius > b.inner,
            "boundary.respawn_min must lie outside the inner threshold",
        )?;
        if let Some(outer) = b.outer {
            ensure(outer > b.inner, "boundary.outer must exceed boundary.inner")?;
            ensure(
                b.respawn_min + b.respawn_span + c.hole_radius <= outer,
                "boundary respawn range must lie inside boundary.outer",
            )?;
        }

        if self.trails.enabled {
            ensure(self.trails.length >= 2, "trails.length must be at least 2")?;
        }
        if let Some(conn) = &self.connections {
            ensure((0.0..=1.0).contains(&conn.probability), "connections.probability must lie in [0, 1]")?;
        }
        Ok(())
    }

    /// Runtime parameters derived from this configuration
    pub fn parameters(&self) -> Parameters {
        Parameters {
            h0: self.engine.fixed_step,
            max_substeps: self.engine.max_substeps,
            solver_iterations: self.engine.solver_iterations,
            container_radius: self.container.size,
            container_mass: self.container.container_mass,
            hole_radius: self.container.hole_radius,
            hole_mass: self.container.hole_mass,
            friction: self.container.friction,
            restitution: self.container.restitution,
            linear_damping: self.engine.linear_damping,
            angular_damping: self.engine.angular_damping,
            spawn: self.spawn.mode.into(),
            spawn_spread: self.spawn.spread,
            launch_speed: self.spawn.launch_speed,
        }
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn ensure(ok: bool, msg: &str) -> SimResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(msg.to_string()))
    }
}
