//! Write-through from simulated bodies to renderable primitives.
//!
//! Holds no state of its own; run it after the integrator and the force
//! policy have finished for the frame.

use super::scenario::Particle;
use super::states::{Body, MaterialTag, NQuat, NVec3, World};
use super::trails::Trail;

/// What the renderer draws for one particle
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub position: NVec3,
    pub orientation: NQuat,
    pub radius: f64,
    pub material: MaterialTag,
}

impl Primitive {
    /// Hole-shaped primitive sitting at `position`, before any body exists
    pub fn at(position: NVec3, radius: f64) -> Self {
        Self {
            position,
            orientation: NQuat::identity(),
            radius,
            material: MaterialTag::Hole,
        }
    }

    pub fn copy_from(&mut self, body: &Body) {
        self.position = body.x;
        self.orientation = body.q;
    }
}

impl From<&Body> for Primitive {
    fn from(body: &Body) -> Self {
        Self {
            position: body.x,
            orientation: body.q,
            radius: body.radius,
            material: body.material,
        }
    }
}

/// Copy every particle's body transform into its primitive
pub fn sync_primitives(world: &World, particles: &[Particle], primitives: &mut [Primitive]) {
    for (particle, prim) in particles.iter().zip(primitives.iter_mut()) {
        prim.copy_from(world.body(particle.body));
    }
}

pub fn mark_trails(trails: &mut [Trail]) {
    for trail in trails.iter_mut() {
        trail.mark_redraw();
    }
}
