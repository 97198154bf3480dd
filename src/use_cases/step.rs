use std::sync::Arc;

use tracing::debug;

use crate::domain::{Clock, ControlCommand, Physics, SimError, StateSnapshot};
use crate::use_cases::assemble::assemble;
use crate::use_cases::context::SimContext;
use crate::use_cases::stepping::run_window;

// Step use case: advance one rate-limited window, then snapshot.
pub struct StepUseCase<P, C> {
    pub ctx: Arc<SimContext<P>>,
    pub clock: C,
}

impl<P, C> StepUseCase<P, C>
where
    P: Physics,
    C: Clock,
{
    pub fn execute(&self, command: ControlCommand) -> Result<StateSnapshot, SimError> {
        let settings = &self.ctx.settings;
        let body = self
            .ctx
            .registry
            .actuated(settings.controlled_body())
            .ok_or_else(|| {
                SimError::UnknownControlledBody(settings.controlled_body().to_string())
            })?;

        let mut world = self.ctx.guard.acquire()?;
        let paused = self.ctx.pause.is_paused();
        let report = run_window(&mut *world, body, &command, settings.max_rate(), paused)?;
        let snapshot = assemble(&*world, &self.ctx.registry, &self.clock);
        drop(world);

        debug!(
            substeps = report.substeps,
            simtime = snapshot.simtime,
            speed = command.speed,
            steering_angle = command.steering_angle,
            paused,
            "step complete"
        );
        Ok(snapshot)
    }
}
