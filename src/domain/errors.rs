use std::fmt;

// Domain-level errors for simulation workflows.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    ResetLengthMismatch { names: usize, poses: usize },
    UnknownControlledBody(String),
    DuplicateBody(String),
    InvalidRate(f64),
    StatePoisoned,
    ClockStalled { time: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ResetLengthMismatch { names, poses } => write!(
                f,
                "body_names has {names} entries but init_state has {poses}"
            ),
            SimError::UnknownControlledBody(name) => {
                write!(f, "controlled body '{name}' is not a registered car")
            }
            SimError::DuplicateBody(name) => write!(f, "body '{name}' is registered twice"),
            SimError::InvalidRate(rate) => write!(f, "max rate must be positive, got {rate}"),
            SimError::StatePoisoned => write!(f, "simulation state poisoned by a panicked holder"),
            SimError::ClockStalled { time } => {
                write!(f, "physics sub-step did not advance time (stuck at {time})")
            }
        }
    }
}

impl std::error::Error for SimError {}
