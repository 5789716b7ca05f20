//! # JWT Token Management
//!
//! Access token generation and validation. Tokens are HS256 signed and carry
//! the user id in `sub`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Token type reported to clients alongside the access token.
pub const TOKEN_TYPE: &str = "bearer";

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| Error::TokenSubject(self.sub.clone()))
    }
}

/// Encode an access token for `user_id`, valid for `expiration_minutes`.
pub fn encode_jwt(user_id: i64, secret: &str, expiration_minutes: i64) -> Result<String> {
    let now = Utc::now();
    let exp = now + Duration::minutes(expiration_minutes);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::TokenEncode(e.to_string()))
}

/// Decode and validate a JWT token (signature and expiry).
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| Error::TokenDecode(e.to_string()))?;

    Ok(token_data.claims)
}
