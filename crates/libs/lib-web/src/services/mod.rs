//! # Services Layer
//!
//! Business logic between the HTTP handlers and the repositories:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repositories (SQLite)
//! ```
//!
//! ## Module Organization
//!
//! - [`user`] - registration, login, profile changes, admin account management
//! - [`access`] - access rule evaluation and business element management
//!
//! ## Error Handling
//!
//! All services return `Result<T, AppError>`. Lower-level failures (database,
//! hashing, token encoding) are converted into the matching `AppError` variant.

pub mod access;
pub mod user;

pub use access::AccessService;
pub use user::UserService;
