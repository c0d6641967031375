pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, BodyHandle, BodyKind, MaterialTag, NQuat, NVec3, World};
pub use simulation::sampler::{points_from_image, sample_points, Shape};
pub use simulation::registry::{register, Registry};
pub use simulation::forces::{ApplyMode, BoundaryShell, FieldSet, ForceLaw, ForcePolicy, Respawn};
pub use simulation::integrator::{advance_world, euler_step, FixedStepper, StepPlan};
pub use simulation::trails::Trail;
pub use simulation::sync::{sync_primitives, Primitive};
pub use simulation::connections::{connect, PairStrategy};
pub use simulation::scenario::{FrameOutcome, Particle, Scene};

pub use configuration::config::SceneConfig;
pub use configuration::presets::PRESET_KEYS;

pub use visualization::viewer::run_viewer;

pub use benchmark::benchmark::{bench_tick, bench_trails};
