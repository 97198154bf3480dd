use tracing::info;

use crate::use_cases::context::PauseFlag;

// Toggles the administrative pause switch. Does not take the simulation guard.
pub struct PauseUseCase {
    pub pause: PauseFlag,
}

impl PauseUseCase {
    pub fn execute(&self, paused: bool) -> bool {
        let was_paused = self.pause.is_paused();
        self.pause.set(paused);
        if was_paused != paused {
            info!(paused, "simulation pause toggled");
        }
        self.pause.is_paused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_pausing_then_flag_reads_paused() {
        let pause = PauseFlag::default();
        let use_case = PauseUseCase {
            pause: pause.clone(),
        };

        assert!(use_case.execute(true));
        assert!(pause.is_paused());
        assert!(!use_case.execute(false));
        assert!(!pause.is_paused());
    }
}
