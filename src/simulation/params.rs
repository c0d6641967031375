//! Numerical and physical parameters for a scene
//!
//! `Parameters` holds the runtime settings the registry and the integrator
//! read every frame:
//! - fixed step size and catch-up cap,
//! - container / hole geometry and masses,
//! - contact material constants and damping,
//! - how holes are spawned at mount

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnMode {
    /// Random direction just outside the container, launched outward
    Outside,
    /// At the sampled point, at rest
    AtPoint,
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64,               // fixed step size
    pub max_substeps: u32,     // catch-up cap per frame
    pub solver_iterations: u32,
    pub container_radius: f64, // container sphere radius (box scenes: edge length)
    pub container_mass: f64,
    pub hole_radius: f64,
    pub hole_mass: f64,
    pub friction: f64,         // container/hole contact friction
    pub restitution: f64,      // container/hole contact restitution
    pub linear_damping: f64,
    pub angular_damping: f64,
    pub spawn: SpawnMode,
    pub spawn_spread: f64,     // extra random distance past the container wall
    pub launch_speed: f64,     // initial outward speed when spawning outside
}

impl Parameters {
    /// Radius of the volume the sampler fills: the container shrunk by one
    /// hole diameter so sampled holes never poke through the wall
    pub fn inner_radius(&self) -> f64 {
        self.container_radius - 2.0 * self.hole_radius
    }
}
