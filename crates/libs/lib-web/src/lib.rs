//! # Web Library
//!
//! HTTP handlers, middleware, services, and server startup for the RBAC
//! service.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::{create_router, init_tracing, prepare_database, start_server, AppState, ServerConfig};
