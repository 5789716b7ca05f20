//! # Middleware
//!
//! Axum middleware for authentication, request stamping, and request logging.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Bearer token authentication and the admin guard
//! - **[`mw_req_stamp`]**: Request ID and arrival time stamping
//! - **[`mw_logging`]**: Request/response logging with header redaction

// region: --- Modules
pub mod mw_auth;
pub mod mw_req_stamp;
pub mod mw_logging;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{require_admin, require_auth, CurrentUser};
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_logging::log_requests;
// endregion: --- Re-exports
