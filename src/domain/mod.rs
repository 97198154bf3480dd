// Domain layer: simulation value types, ports and the body registry.

pub mod control;
pub mod errors;
pub mod ports;
pub mod pose;
pub mod registry;
pub mod snapshot;

pub use control::ControlCommand;
pub use errors::SimError;
pub use ports::{Clock, HalfStep, Physics, SimBody};
pub use pose::{Pose, Quat, Twist, Vec3};
pub use registry::EntityRegistry;
pub use snapshot::{BodyState, StateSnapshot};
