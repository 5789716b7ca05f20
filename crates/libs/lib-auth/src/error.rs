//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to hash password: {0}")]
    PwdHash(String),

    #[error("Failed to parse password hash: {0}")]
    PwdHashParse(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    #[error("Failed to decode JWT: {0}")]
    TokenDecode(String),

    #[error("Token subject is not a user id: {0}")]
    TokenSubject(String),
}
