//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Handlers extract the request,
//! delegate to a service in [`crate::services`], and return `Json` bodies or
//! an [`AppError`](lib_core::AppError).
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: registration, login, logout
//!   - `POST /users/register`
//!   - `POST /users/login` (form-urlencoded)
//!   - `POST /users/logout`
//!
//! - **[`users`]**: the caller's own record and guarded user reads
//!   - `GET | PATCH | DELETE /users/me`
//!   - `GET /users`
//!   - `GET /users/{id}`
//!
//! - **[`admin`]**: account and access rule management (admin role only)
//!   - `POST /admin/users/create`
//!   - `PATCH /admin/users/{user_id}/role`
//!   - `GET /admin/permissions`
//!   - `PATCH /admin/permissions/{role_id}/{element_id}`
//!
//! - **[`business_elements`]**: guarded resources (admin role only)
//!   - `GET | POST /business-elements/elements`
//!
//! ## Authentication
//!
//! Protected routes sit behind [`require_auth`](crate::middleware::require_auth),
//! which injects a [`CurrentUser`](crate::middleware::CurrentUser) extension.
//! Admin routes add [`require_admin`](crate::middleware::require_admin).
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! CORS → Request stamp → Trace span → Request logging
//!     ↓
//! Auth middleware (bearer token, admin guard)
//!     ↓
//! Handler → Service → Repository
//!     ↓
//! Json body or AppError
//! ```

pub mod admin;
pub mod auth;
pub mod business_elements;
pub mod users;
