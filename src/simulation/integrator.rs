//! Fixed-step time integration for the hole field
//!
//! Two pieces:
//! - [`FixedStepper`] turns variable frame times into a whole number of
//!   fixed steps, capped per frame so a stalled frame cannot snowball
//! - [`euler_step`] advances every dynamic body of a [`World`] by one step

use log::debug;

use super::params::Parameters;
use super::states::{NQuat, World};

/// Steps to run for one frame, as decided by [`FixedStepper::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepPlan {
    pub steps: u32,   // fixed steps to execute now
    pub dropped: u32, // whole steps discarded by the catch-up cap
}

/// Accumulates frame time and hands out fixed steps.
///
/// After every [`advance`](FixedStepper::advance) the leftover time is
/// strictly below one step.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    step: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedStepper {
    /// `step` must be positive and finite, `max_substeps` at least one
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Add one frame's elapsed time and return how many steps to run.
    /// Negative or non-finite `delta` counts as no time at all.
    pub fn advance(&mut self, delta: f64) -> StepPlan {
        if delta.is_finite() && delta > 0.0 {
            self.accumulator += delta;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        let mut dropped = 0;
        if self.accumulator >= self.step {
            // over the cap: keep only the sub-step remainder
            dropped = (self.accumulator / self.step).floor() as u32;
            self.accumulator -= dropped as f64 * self.step;
            if self.accumulator >= self.step || self.accumulator < 0.0 {
                self.accumulator = 0.0;
            }
            debug!("catch-up cap hit: ran {steps} steps, dropped {dropped}");
        }

        StepPlan { steps, dropped }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Advance the world by one fixed step `dt` using semi-implicit Euler.
///
/// For each dynamic body:
/// - `v += (g + F/m) dt`, then linear damping `v *= (1 - d)^dt`, then `x += v dt`
/// - `w += I^-1 tau dt` with the solid-sphere inertia `2/5 m r^2`, then angular
///   damping, then the orientation is rotated by `w dt`
///
/// Accumulated forces and torques are cleared afterwards, and `world.t`
/// advances by `dt`.
pub fn euler_step(world: &mut World, dt: f64, params: &Parameters) {
    let linear_keep = (1.0 - params.linear_damping).max(0.0).powf(dt);
    let angular_keep = (1.0 - params.angular_damping).max(0.0).powf(dt);
    let gravity = world.gravity;

    for b in world.bodies.iter_mut() {
        if !b.is_dynamic() || b.m <= 0.0 {
            b.clear_accumulators();
            continue;
        }

        // Linear: kick then drift
        b.v += (gravity + b.force / b.m) * dt;
        b.v *= linear_keep;
        b.x += b.v * dt;

        // Angular
        let inertia = 0.4 * b.m * b.radius * b.radius;
        if inertia > 0.0 {
            b.w += b.torque / inertia * dt;
        }
        b.w *= angular_keep;
        b.q = NQuat::from_scaled_axis(b.w * dt) * b.q;
        b.q.renormalize();

        b.clear_accumulators();
    }

    world.t += dt;
    world.steps += 1;
}

/// Run the steps of one frame: ask `stepper` how many fixed steps `delta`
/// buys and integrate the world that many times.
///
/// `before_step` runs ahead of every step and never on a frame that buys no
/// step, so whatever it applies is integrated exactly once.
pub fn advance_world<F>(
    world: &mut World,
    stepper: &mut FixedStepper,
    delta: f64,
    params: &Parameters,
    mut before_step: F,
) -> StepPlan
where
    F: FnMut(&mut World),
{
    let plan = stepper.advance(delta);
    for _ in 0..plan.steps {
        before_step(world);
        euler_step(world, stepper.step(), params);
    }
    plan
}
