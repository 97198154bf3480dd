use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Clock, Physics, Pose, SimError, StateSnapshot};
use crate::use_cases::assemble::assemble;
use crate::use_cases::context::SimContext;

// Reset request: paired body names and target poses.
#[derive(Debug, Clone, Default)]
pub struct ResetRequest {
    pub body_names: Vec<String>,
    pub init_state: Vec<Pose>,
}

// Reset use case: return the world to baseline, then place the named bodies.
pub struct ResetUseCase<P, C> {
    pub ctx: Arc<SimContext<P>>,
    pub clock: C,
}

impl<P, C> ResetUseCase<P, C>
where
    P: Physics,
    C: Clock,
{
    pub fn execute(&self, request: ResetRequest) -> Result<StateSnapshot, SimError> {
        let mut world = self.ctx.guard.acquire()?;

        info!(bodies = request.body_names.len(), "reset initiated");
        if request.body_names.len() != request.init_state.len() {
            return Err(SimError::ResetLengthMismatch {
                names: request.body_names.len(),
                poses: request.init_state.len(),
            });
        }

        world.reset_to_baseline();

        for (name, pose) in request.body_names.iter().zip(&request.init_state) {
            match self.ctx.registry.lookup(name) {
                Some(body) => body.set_pose(&mut *world, pose),
                // Unknown names are tolerated so a partial scene can still reset.
                None => warn!(body = %name, "reset skipped unknown body"),
            }
        }

        Ok(assemble(&*world, &self.ctx.registry, &self.clock))
    }
}
