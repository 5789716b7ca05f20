//! # RBAC Server
//!
//! Thin entry point that delegates to lib-web for server setup. Migrations
//! and seed data are applied before the listener is bound; any startup
//! failure exits non-zero.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    start_server(ServerConfig::default()).await
}
