use std::sync::Arc;

use tracing::debug;

use crate::domain::{Clock, ControlCommand, Physics, SimError, StateSnapshot};
use crate::use_cases::assemble::assemble;
use crate::use_cases::context::SimContext;
use crate::use_cases::stepping::run_window;

/// Runs a sequence of commands as back-to-back stepping windows.
///
/// The guard is held for the whole sequence, so no other request can observe
/// or disturb the world between two windows of one rollout. One snapshot is
/// returned per command, in command order.
pub struct RolloutUseCase<P, C> {
    pub ctx: Arc<SimContext<P>>,
    pub clock: C,
}

impl<P, C> RolloutUseCase<P, C>
where
    P: Physics,
    C: Clock,
{
    pub fn execute(&self, commands: &[ControlCommand]) -> Result<Vec<StateSnapshot>, SimError> {
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
        let mut snapshots = Vec::with_capacity(commands.len());
        let mut substeps = 0;

        for command in commands {
            let report = run_window(&mut *world, body, command, settings.max_rate(), paused)?;
            substeps += report.substeps;
            snapshots.push(assemble(&*world, &self.ctx.registry, &self.clock));
        }
        drop(world);

        debug!(windows = commands.len(), substeps, paused, "rollout complete");
        Ok(snapshots)
    }
}
