//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserLike;

/// Numeric identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i32);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered member of the network
#[derive(Debug, Clone, Serialize)]
pub struct AppUser {
    pub id: UserId,
    /// Unique, stored lower-case
    pub username: String,
    pub known_as: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    /// Outgoing like edges. Only loaded by `LikesRepository::get_user_with_likes`.
    pub liked_users: Vec<UserLike>,
}

/// Usernames are compared and stored lower-case
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_username_lowercases_and_trims() {
        assert_eq!(normalize_username("  SourceUsername "), "sourceusername");
        assert_eq!(normalize_username("lisa"), "lisa");
    }
}
