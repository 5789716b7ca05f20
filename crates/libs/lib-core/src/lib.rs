//! # Core Library
//!
//! Configuration, errors, DTOs, the RBAC policy, and the SQLite store
//! (migrations, repositories, seed data).

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, run_migrations, DbPool, MIGRATOR};
