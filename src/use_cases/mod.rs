// Use cases layer: guard discipline, stepping and the request workflows.

pub mod assemble;
pub mod context;
pub mod get_state;
pub mod guard;
pub mod observer;
pub mod pause;
pub mod reset;
pub mod rollout;
pub mod step;
pub mod stepping;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{PauseFlag, SimContext, StepSettings};
pub use get_state::GetStateUseCase;
pub use observer::{ObserverHandle, spawn_observer};
pub use pause::PauseUseCase;
pub use reset::{ResetRequest, ResetUseCase};
pub use rollout::RolloutUseCase;
pub use step::StepUseCase;
