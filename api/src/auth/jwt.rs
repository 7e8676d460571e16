//! JWT validation and claims-based identity
//!
//! Tokens are minted by the account service; this API only verifies them.
//! `nameid` carries the numeric user id and `unique_name` the username.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{normalize_username, UserId};
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Name identifier (numeric user ID)
    pub nameid: String,
    /// Username
    pub unique_name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

/// Derive the caller's identity from verified claims
pub fn current_user(claims: &Claims) -> Result<CurrentUser, AppError> {
    let id = claims
        .nameid
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized)?;

    if claims.unique_name.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }

    Ok(CurrentUser {
        id: UserId(id),
        username: normalize_username(&claims.unique_name),
    })
}

/// Verifies HS512 bearer tokens
#[derive(Clone)]
pub struct TokenService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS512),
        }
    }

    /// Decode and validate a token, returning its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::Unauthorized
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}
