//! Background observer that periodically snapshots the world.
//!
//! It runs on its own OS thread and contends for the simulation guard like
//! any request. Snapshots fan out on a broadcast channel; a send with no
//! subscribers is not an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::domain::{Clock, Physics, StateSnapshot};
use crate::use_cases::assemble::assemble;
use crate::use_cases::context::SimContext;

pub struct ObserverHandle {
    shutdown: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl ObserverHandle {
    /// Signals the observer and waits for its thread to exit.
    pub fn stop(self) {
        self.shutdown.store(true, Ordering::Release);
        if self.join.join().is_err() {
            error!("observer thread panicked");
        }
    }
}

pub fn spawn_observer<P, C>(
    ctx: Arc<SimContext<P>>,
    clock: C,
    interval: Duration,
    snapshot_tx: broadcast::Sender<StateSnapshot>,
) -> std::io::Result<ObserverHandle>
where
    P: Physics,
    C: Clock + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    let join = thread::Builder::new()
        .name("sim-observer".into())
        .spawn(move || run_observer(&ctx, &clock, interval, &snapshot_tx, &flag))?;

    Ok(ObserverHandle { shutdown, join })
}

fn run_observer<P, C>(
    ctx: &SimContext<P>,
    clock: &C,
    interval: Duration,
    snapshot_tx: &broadcast::Sender<StateSnapshot>,
    shutdown: &AtomicBool,
) where
    P: Physics,
    C: Clock,
{
    info!(interval_ms = interval.as_millis() as u64, "observer started");
    let mut next_frame = Instant::now();

    while !shutdown.load(Ordering::Acquire) {
        let snapshot = match ctx.guard.acquire() {
            Ok(world) => assemble(&*world, &ctx.registry, clock),
            Err(err) => {
                error!(error = %err, "observer stopping");
                return;
            }
        };

        if let Err(broadcast::error::SendError(snapshot)) = snapshot_tx.send(snapshot) {
            debug!(simtime = snapshot.simtime, "no body_state subscribers");
        }

        // Fixed cadence; skip ahead instead of bursting when we fall behind.
        next_frame += interval;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            next_frame = now;
        }
    }

    info!("observer stopped");
}
