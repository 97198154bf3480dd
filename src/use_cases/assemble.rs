use crate::domain::{Clock, EntityRegistry, Physics, StateSnapshot};

// Builds a snapshot of every registered body. Callers must hold the guard;
// the world is only read.
pub fn assemble<P, C>(world: &P, registry: &EntityRegistry<P>, clock: &C) -> StateSnapshot
where
    P: Physics,
    C: Clock + ?Sized,
{
    StateSnapshot {
        simtime: world.time(),
        capture_time_us: clock.now_epoch_micros(),
        states: registry.iter().map(|body| body.extract_state(world)).collect(),
    }
}
