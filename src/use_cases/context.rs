// Shared simulation context handed to every use case and the observer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{EntityRegistry, Physics, SimError};
use crate::use_cases::guard::SimGuard;

/// Default stepping rate: one step request advances 1/60 s of simulated time.
pub const DEFAULT_MAX_RATE: f64 = 60.0;
/// Car that receives step commands when none is configured.
pub const DEFAULT_CONTROLLED_BODY: &str = "buddy";

/// Process-wide administrative pause switch.
///
/// Read without the simulation lock, so a toggle may land between two step
/// requests rather than at an exact simulated instant.
#[derive(Debug, Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    pub fn new(paused: bool) -> Self {
        Self(Arc::new(AtomicBool::new(paused)))
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, paused: bool) {
        self.0.store(paused, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepSettings {
    max_rate: f64,
    controlled_body: String,
}

impl StepSettings {
    pub fn new(max_rate: f64, controlled_body: impl Into<String>) -> Result<Self, SimError> {
        if !max_rate.is_finite() || max_rate <= 0.0 {
            return Err(SimError::InvalidRate(max_rate));
        }
        Ok(Self {
            max_rate,
            controlled_body: controlled_body.into(),
        })
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }

    // Simulated seconds one step request must cover.
    pub fn window(&self) -> f64 {
        1.0 / self.max_rate
    }

    pub fn controlled_body(&self) -> &str {
        &self.controlled_body
    }
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            max_rate: DEFAULT_MAX_RATE,
            controlled_body: DEFAULT_CONTROLLED_BODY.to_string(),
        }
    }
}

pub struct SimContext<P> {
    pub guard: SimGuard<P>,
    pub registry: EntityRegistry<P>,
    pub pause: PauseFlag,
    pub settings: StepSettings,
}

impl<P: Physics> SimContext<P> {
    /// Wires the world and registry together; the controlled body must be a
    /// registered car.
    pub fn new(
        world: P,
        registry: EntityRegistry<P>,
        pause: PauseFlag,
        settings: StepSettings,
    ) -> Result<Self, SimError> {
        if registry.actuated(settings.controlled_body()).is_none() {
            return Err(SimError::UnknownControlledBody(
                settings.controlled_body().to_string(),
            ));
        }
        Ok(Self {
            guard: SimGuard::new(world),
            registry,
            pause,
            settings,
        })
    }
}
