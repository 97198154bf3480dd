// Interface adapters: wire protocol, HTTP handlers and the state stream.

pub mod handlers;
pub mod http;
pub mod net;
pub mod protocol;
pub mod routes;
pub mod state;
