//! Exclusive access to the single simulation state.
//!
//! Every read or write of the physics world goes through a [`StateHandle`].
//! There is no shared read mode: request volume is low next to stepping work,
//! so a plain mutex keeps the discipline simple.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use tracing::error;

use crate::domain::SimError;

pub struct SimGuard<P> {
    state: Mutex<P>,
}

impl<P> SimGuard<P> {
    pub fn new(state: P) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Blocks until no other holder is active.
    ///
    /// The lock is released when the returned handle drops, so early returns
    /// cannot leak it. A holder that panicked leaves the state half-mutated;
    /// that is reported as [`SimError::StatePoisoned`] on every later acquire.
    pub fn acquire(&self) -> Result<StateHandle<'_, P>, SimError> {
        self.state.lock().map(StateHandle).map_err(|_| {
            error!("simulation state poisoned; refusing access");
            SimError::StatePoisoned
        })
    }
}

// Scoped handle to the simulation state; dropping it releases the guard.
pub struct StateHandle<'a, P>(MutexGuard<'a, P>);

impl<P> Deref for StateHandle<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.0
    }
}

impl<P> DerefMut for StateHandle<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut self.0
    }
}
