//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::auth::{Claims, TokenService};
use crate::domain::entities::{AppUser, Message, UserId};

/// Signing key shared by `test_token` and `test_token_service`
pub const TEST_TOKEN_KEY: &str = "test-token-key-with-enough-length-for-hs512";

/// Create a test user with the given id and username
pub fn test_user(id: i32, username: &str) -> AppUser {
    AppUser {
        id: UserId(id),
        username: username.to_string(),
        known_as: None,
        created_at: Utc::now(),
        last_active: Utc::now(),
        liked_users: vec![],
    }
}

/// Create an unread message from `sender` to `recipient`
pub fn test_message(sender: &AppUser, recipient: &AppUser, content: &str) -> Message {
    Message::new(sender, recipient, content)
}

pub fn test_token_service() -> TokenService {
    TokenService::new(TEST_TOKEN_KEY)
}

/// Sign arbitrary claims with the test key
pub fn token_with_claims(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS512),
        claims,
        &EncodingKey::from_secret(TEST_TOKEN_KEY.as_bytes()),
    )
    .unwrap()
}

/// A valid bearer token for `user`, expiring in an hour
pub fn test_token(user: &AppUser) -> String {
    let now = Utc::now();
    token_with_claims(&Claims {
        nameid: user.id.to_string(),
        unique_name: user.username.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    })
}
