use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::broadcast;

use crate::domain::{Clock, StateSnapshot};
use crate::frameworks::kinematics::KinematicWorld;
use crate::use_cases::SimContext;

// Application state shared by every route.
#[derive(Clone)]
pub struct AppState {
    // Guarded world, body registry, pause flag and step settings.
    pub sim: Arc<SimContext<KinematicWorld>>,
    // Snapshots published by the observer thread.
    pub snapshot_tx: broadcast::Sender<StateSnapshot>,
}

// System clock adapter used by snapshot assembly.
#[derive(Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_micros(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as u64
    }
}
