//! Force and boundary rules applied to every hole before each fixed step
//!
//! Each body is first tested against the legal shell around the container
//! center. Bodies that left it are teleported back out to a fresh respawn
//! distance and relaunched; the rest receive the summed contributions of a
//! [`FieldSet`] (central attraction, centripetal correction, ...), written as
//! a velocity, a force, or both depending on [`ApplyMode`].

use rand::Rng;

use crate::simulation::registry::random_direction;
use crate::simulation::states::{Body, BodyHandle, NVec3, World};

/// Geometry of a body relative to the container center, shared by all terms
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub distance: f64, // |x|, never below the policy's min_distance
    pub toward: NVec3, // unit vector from the body to the center
}

/// Trait for one contribution to the in-bounds velocity/force of a body
pub trait FieldTerm {
    fn contribution(&self, body: &Body, probe: &Probe) -> NVec3;

    /// False for terms that only ever act as a force, even when the policy
    /// also assigns velocity
    fn steers_velocity(&self) -> bool {
        true
    }
}

/// Summed field contributions for one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTotal {
    pub all: NVec3,      // every term
    pub steering: NVec3, // only the terms that steer velocity
}

impl FieldTotal {
    pub fn is_finite(&self) -> bool {
        self.all.iter().chain(self.steering.iter()).all(|c| c.is_finite())
    }
}

/// Collection of field terms whose contributions are summed per body
pub struct FieldSet {
    terms: Vec<Box<dyn FieldTerm + Send + Sync>>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a field term
    pub fn with(mut self, term: impl FieldTerm + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn accumulate(&self, body: &Body, probe: &Probe) -> FieldTotal {
        let mut total = FieldTotal {
            all: NVec3::zeros(),
            steering: NVec3::zeros(),
        };
        for term in &self.terms {
            let c = term.contribution(body, probe);
            total.all += c;
            if term.steers_velocity() {
                total.steering += c;
            }
        }
        total
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceLaw {
    InverseLinear, // strength / d
    InverseSquare, // strength / d^2
}

impl ForceLaw {
    pub fn exponent(self) -> i32 {
        match self {
            ForceLaw::InverseLinear => 1,
            ForceLaw::InverseSquare => 2,
        }
    }
}

/// Pull toward the container center with magnitude `strength / d^p`
pub struct CentralAttraction {
    pub strength: f64,
    pub law: ForceLaw,
}

impl FieldTerm for CentralAttraction {
    fn contribution(&self, _body: &Body, probe: &Probe) -> NVec3 {
        probe.toward * (self.strength / probe.distance.powi(self.law.exponent()))
    }
}

/// Sideways kick along `v x toward` that bends radial infall into orbits
pub struct CentripetalCorrection {
    pub strength: f64,
}

impl FieldTerm for CentripetalCorrection {
    fn contribution(&self, body: &Body, probe: &Probe) -> NVec3 {
        // zero when the body moves straight along the radius
        body.v
            .cross(&probe.toward)
            .try_normalize(1e-12)
            .map(|c| c * self.strength)
            .unwrap_or_else(NVec3::zeros)
    }

    fn steers_velocity(&self) -> bool {
        false
    }
}

/// How the in-bounds field result is written into a body.
/// `VelocityAndForce` assigns only the steering terms as velocity and applies
/// every term as a force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Velocity,
    Force,
    VelocityAndForce,
}

/// Distance range in which bodies are attracted rather than recycled.
/// The test uses `|x| + radius`: at or below `inner` the body fell into the
/// center, above `outer` it escaped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryShell {
    pub inner: f64,
    pub outer: Option<f64>,
}

impl BoundaryShell {
    pub fn is_outside(&self, body: &Body) -> bool {
        let reach = body.distance_from_center() + body.radius;
        reach <= self.inner || self.outer.is_some_and(|outer| reach > outer)
    }
}

/// Where and how fast recycled bodies come back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Respawn {
    pub min: f64,          // closest respawn distance
    pub span: f64,         // respawn distance is uniform in [min, min + span)
    pub launch_gain: f64,  // velocity = x * gain + bias
    pub launch_bias: f64,
}

impl Respawn {
    pub fn max(&self) -> f64 {
        self.min + self.span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyOutcome {
    Respawned,
    Attracted,
    Idle, // degenerate geometry or non-finite field, left untouched
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyReport {
    pub respawned: usize,
    pub attracted: usize,
    pub idle: usize,
}

/// Per-frame rule set for every hole
pub struct ForcePolicy {
    pub shell: BoundaryShell,
    pub respawn: Respawn,
    pub field: FieldSet,
    pub mode: ApplyMode,
    pub force_point: Option<NVec3>, // application point relative to the body center
    pub radial_push: f64,           // constant extra force toward the center
    pub min_distance: f64,          // below this the center direction is undefined
}

impl ForcePolicy {
    /// Apply the policy to every body in `handles`
    pub fn apply<R, I>(&self, world: &mut World, handles: I, rng: &mut R) -> PolicyReport
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = BodyHandle>,
    {
        let mut report = PolicyReport::default();
        for h in handles {
            let body = world.body_mut(h);
            if !body.is_dynamic() {
                continue;
            }
            match self.apply_body(body, rng) {
                BodyOutcome::Respawned => report.respawned += 1,
                BodyOutcome::Attracted => report.attracted += 1,
                BodyOutcome::Idle => report.idle += 1,
            }
        }
        report
    }

    pub fn apply_body<R: Rng + ?Sized>(&self, body: &mut Body, rng: &mut R) -> BodyOutcome {
        if self.shell.is_outside(body) {
            self.recycle(body, rng);
            return BodyOutcome::Respawned;
        }

        let d = body.distance_from_center();
        if d < self.min_distance {
            return BodyOutcome::Idle;
        }
        let probe = Probe {
            distance: d.max(self.min_distance),
            toward: -body.x / d,
        };

        let total = self.field.accumulate(body, &probe);
        if !total.is_finite() {
            return BodyOutcome::Idle;
        }

        match self.mode {
            ApplyMode::Velocity => body.v = total.all,
            ApplyMode::Force => body.apply_force(total.all, self.force_point),
            ApplyMode::VelocityAndForce => {
                body.v = total.steering;
                body.apply_force(total.all, self.force_point);
            }
        }
        if self.radial_push != 0.0 {
            body.apply_force(probe.toward * self.radial_push, None);
        }

        BodyOutcome::Attracted
    }

    /// Teleport `body` to a new distance in the respawn range, pointing
    /// roughly the way it already was, and relaunch it
    fn recycle<R: Rng + ?Sized>(&self, body: &mut Body, rng: &mut R) {
        let jitter = NVec3::new(
            rng.gen::<f64>() - 0.5,
            rng.gen::<f64>() - 0.5,
            rng.gen::<f64>() - 0.5,
        );
        let dir = (body.x + jitter)
            .try_normalize(1e-9)
            .unwrap_or_else(|| random_direction(rng));

        let dist = self.respawn.min + rng.gen::<f64>() * self.respawn.span;
        let x = dir * dist;
        let v = x * self.respawn.launch_gain + NVec3::repeat(self.respawn.launch_bias);

        body.teleport(x, v);
    }
}
