//! Core state types for the hole-field simulation.
//!
//! Defines the rigid body, the world that owns every body, and the
//! material / contact bookkeeping attached to it:
//! - `Body` holds linear and angular state plus the accumulated force/torque
//! - `World` holds the bodies, gravity, solver settings and elapsed time `t`

use nalgebra::{UnitQuaternion, Vector3};
pub type NVec3 = Vector3<f64>;
pub type NQuat = UnitQuaternion<f64>;

/// Index of a body inside [`World::bodies`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic, // integrated every step
    Static,  // never moves (the container)
}

/// Material tags used for contact pairing and for the render descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialTag {
    Container,
    Hole,
}

/// Friction / restitution for a pair of materials
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMaterial {
    pub a: MaterialTag,
    pub b: MaterialTag,
    pub friction: f64,
    pub restitution: f64,
}

impl ContactMaterial {
    pub fn pairs(&self, a: MaterialTag, b: MaterialTag) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec3,       // position
    pub v: NVec3,       // velocity
    pub q: NQuat,       // orientation
    pub w: NVec3,       // angular velocity
    pub force: NVec3,   // force accumulated until the next step
    pub torque: NVec3,  // torque accumulated until the next step
    pub m: f64,         // mass
    pub radius: f64,    // sphere shape radius
    pub material: MaterialTag,
    pub kind: BodyKind,
}

impl Body {
    /// Dynamic sphere at rest at `x`
    pub fn dynamic(x: NVec3, m: f64, radius: f64, material: MaterialTag) -> Self {
        Self {
            x,
            v: NVec3::zeros(),
            q: NQuat::identity(),
            w: NVec3::zeros(),
            force: NVec3::zeros(),
            torque: NVec3::zeros(),
            m,
            radius,
            material,
            kind: BodyKind::Dynamic,
        }
    }

    /// Static sphere, ignored by the integrator
    pub fn fixed(x: NVec3, m: f64, radius: f64, material: MaterialTag) -> Self {
        Self {
            kind: BodyKind::Static,
            ..Self::dynamic(x, m, radius, material)
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    pub fn distance_from_center(&self) -> f64 {
        self.x.norm()
    }

    /// Add `f` to the accumulated force. `relative_point` is the application
    /// point relative to the center of mass; an off-center point adds torque.
    pub fn apply_force(&mut self, f: NVec3, relative_point: Option<NVec3>) {
        self.force += f;
        if let Some(r) = relative_point {
            self.torque += r.cross(&f);
        }
    }

    pub fn clear_accumulators(&mut self) {
        self.force = NVec3::zeros();
        self.torque = NVec3::zeros();
    }

    /// Overwrite position and velocity without integrating
    pub fn teleport(&mut self, x: NVec3, v: NVec3) {
        self.x = x;
        self.v = v;
        self.clear_accumulators();
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub bodies: Vec<Body>,                     // every body, container included
    pub gravity: NVec3,                        // always zero in the shipped scenes
    pub solver: SolverConfig,
    pub contact_materials: Vec<ContactMaterial>,
    pub t: f64,                                // simulated time
    pub steps: u64,                            // fixed steps taken so far
}

impl World {
    pub fn new(solver: SolverConfig) -> Self {
        Self {
            bodies: Vec::new(),
            gravity: NVec3::zeros(),
            solver,
            contact_materials: Vec::new(),
            t: 0.0,
            steps: 0,
        }
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, h: BodyHandle) -> &Body {
        &self.bodies[h.0]
    }

    pub fn body_mut(&mut self, h: BodyHandle) -> &mut Body {
        &mut self.bodies[h.0]
    }

    pub fn add_contact_material(&mut self, cm: ContactMaterial) {
        self.contact_materials.push(cm);
    }

    pub fn contact_material(&self, a: MaterialTag, b: MaterialTag) -> Option<&ContactMaterial> {
        self.contact_materials.iter().find(|cm| cm.pairs(a, b))
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}
