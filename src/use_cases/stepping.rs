//! Fixed-window stepping loop.
//!
//! A window is measured in simulated time, not wall time: if the physics is
//! slow the window takes longer to run, but every step request advances the
//! world by the same amount.

use tracing::trace;

use crate::domain::{ControlCommand, HalfStep, Physics, SimBody, SimError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub substeps: u64,
    pub sim_elapsed: f64,
}

/// Advances `world` until at least `1 / max_rate` simulated seconds have
/// passed, applying `command` to `body` between the two halves of every
/// sub-step. A paused world is left untouched.
pub fn run_window<P: Physics>(
    world: &mut P,
    body: &dyn SimBody<P>,
    command: &ControlCommand,
    max_rate: f64,
    paused: bool,
) -> Result<StepReport, SimError> {
    let start = world.time();
    let window = 1.0 / max_rate;
    let mut substeps = 0u64;

    if paused {
        return Ok(StepReport {
            substeps,
            sim_elapsed: 0.0,
        });
    }

    while world.time() - start < window {
        let before = world.time();

        world.advance_half_step(HalfStep::First);
        body.apply_control(world, command);
        world.advance_half_step(HalfStep::Second);
        substeps += 1;

        // A world whose clock never moves would hold the lock forever.
        if world.time() <= before {
            return Err(SimError::ClockStalled { time: world.time() });
        }
    }

    let sim_elapsed = world.time() - start;
    trace!(substeps, sim_elapsed, "stepping window complete");
    Ok(StepReport {
        substeps,
        sim_elapsed,
    })
}
