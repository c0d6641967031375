//! Rigid body registration for a freshly mounted scene
//!
//! Turns the sampled points into bodies: one static container sphere at the
//! origin plus one dynamic hole per point, and registers the single
//! container/hole contact material. Runs once per world.

use log::debug;
use rand::Rng;

use crate::error::{SimError, SimResult};
use crate::simulation::params::{Parameters, SpawnMode};
use crate::simulation::states::{Body, BodyHandle, ContactMaterial, MaterialTag, NVec3, World};

/// Handles produced by [`register`]; `holes[i]` belongs to `points[i]`
#[derive(Debug, Clone)]
pub struct Registry {
    pub container: BodyHandle,
    pub holes: Vec<BodyHandle>,
}

/// Populate an empty `world` with the container and one body per point.
///
/// Fails with [`SimError::AlreadyRegistered`] if the world already holds
/// bodies, so a second mount never duplicates the particle set.
pub fn register<R: Rng + ?Sized>(world: &mut World, points: &[NVec3], params: &Parameters, rng: &mut R) -> SimResult<Registry> {
    if !world.is_empty() {
        return Err(SimError::AlreadyRegistered);
    }

    world.gravity = NVec3::zeros();
    world.solver.iterations = params.solver_iterations;

    let container = world.add_body(Body::fixed(
        NVec3::zeros(),
        params.container_mass,
        params.container_radius,
        MaterialTag::Container,
    ));

    world.add_contact_material(ContactMaterial {
        a: MaterialTag::Container,
        b: MaterialTag::Hole,
        friction: params.friction,
        restitution: params.restitution,
    });

    let holes: Vec<BodyHandle> = points
        .iter()
        .map(|p| world.add_body(spawn_body(p, params, rng)))
        .collect();

    debug!("registered container and {} holes ({:?} spawn)", holes.len(), params.spawn);

    Ok(Registry { container, holes })
}

fn spawn_body<R: Rng + ?Sized>(point: &NVec3, params: &Parameters, rng: &mut R) -> Body {
    match params.spawn {
        SpawnMode::AtPoint => Body::dynamic(*point, params.hole_mass, params.hole_radius, MaterialTag::Hole),
        SpawnMode::Outside => {
            let dir = random_direction(rng);
            let dist = params.container_radius + params.hole_radius + rng.gen::<f64>() * params.spawn_spread;

            let mut body = Body::dynamic(dir * dist, params.hole_mass, params.hole_radius, MaterialTag::Hole);
            body.v = dir * params.launch_speed;
            body
        }
    }
}

/// Unit vector from a jittered cube sample; redraws the (vanishingly rare)
/// degenerate sample at the cube center
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> NVec3 {
    loop {
        let d = NVec3::new(
            rng.gen::<f64>() - 0.5,
            rng.gen::<f64>() - 0.5,
            rng.gen::<f64>() - 0.5,
        );
        if let Some(unit) = d.try_normalize(1e-9) {
            return unit;
        }
    }
}
