//! HTTP gateway exposing the question endpoint and a health check.

mod error;
mod handlers;
mod router;
mod server;

pub use error::GatewayError;
pub use server::{GatewayServer, QueryHandler};
