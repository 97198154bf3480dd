use crate::domain::control::ControlCommand;
use crate::domain::pose::Pose;
use crate::domain::snapshot::BodyState;

// Which half of a physics sub-step to run. Controls are applied between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfStep {
    // Forward kinematics and force accumulation, time unchanged.
    First,
    // Integration; advances time by one sub-step.
    Second,
}

// Port for the physics engine that owns the simulation state.
pub trait Physics: Send + 'static {
    fn time(&self) -> f64;
    fn advance_half_step(&mut self, half: HalfStep);
    // Restores the baseline configuration and sets time back to zero.
    fn reset_to_baseline(&mut self);
}

// Port for a named body living inside the physics world `P`.
//
// Bodies hold only handles into the world; every read or write goes through
// the world reference so it happens under the simulation lock.
pub trait SimBody<P>: Send + Sync {
    fn name(&self) -> &str;

    // Passive bodies keep the default no-op.
    fn apply_control(&self, _world: &mut P, _command: &ControlCommand) {}

    fn extract_state(&self, world: &P) -> BodyState;

    fn set_pose(&self, world: &mut P, pose: &Pose);
}

// Port for retrieving the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now_epoch_micros(&self) -> u64;
}
