// Snapshot records returned to callers; built fresh per request.

use super::pose::{Pose, Twist};

#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub name: String,
    pub pose: Pose,
    // Bodies without a velocity estimate leave this empty.
    pub twist: Option<Twist>,
}

impl BodyState {
    pub fn new(name: impl Into<String>, pose: Pose) -> Self {
        Self {
            name: name.into(),
            pose,
            twist: None,
        }
    }

    pub fn with_twist(mut self, twist: Twist) -> Self {
        self.twist = Some(twist);
        self
    }
}

/// Immutable copy of every registered body plus the simulation clock.
///
/// `states` lists actuated bodies first, then passive bodies, each group in
/// registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub simtime: f64,
    // Wall-clock capture time, microseconds since the Unix epoch.
    pub capture_time_us: u64,
    pub states: Vec<BodyState>,
}

impl StateSnapshot {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }

    pub fn body(&self, name: &str) -> Option<&BodyState> {
        self.states.iter().find(|s| s.name == name)
    }
}
