use std::sync::Arc;

use crate::domain::{Clock, Physics, SimError, StateSnapshot};
use crate::use_cases::assemble::assemble;
use crate::use_cases::context::SimContext;

// Read-only snapshot of the current simulation state.
pub struct GetStateUseCase<P, C> {
    pub ctx: Arc<SimContext<P>>,
    pub clock: C,
}

impl<P, C> GetStateUseCase<P, C>
where
    P: Physics,
    C: Clock,
{
    pub fn execute(&self) -> Result<StateSnapshot, SimError> {
        let world = self.ctx.guard.acquire()?;
        Ok(assemble(&*world, &self.ctx.registry, &self.clock))
    }
}
