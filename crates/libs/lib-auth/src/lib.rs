//! # Authentication Library
//!
//! Password hashing and JWT access token management.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_dummy, verify_password};
pub use token::{decode_jwt, encode_jwt, Claims, TOKEN_TYPE};
