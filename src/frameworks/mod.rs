// Frameworks: configuration, default physics backend and server bootstrap.

pub mod config;
pub mod kinematics;
pub mod server;
pub mod world_setup;
