//! Like domain entity
//!
//! A like is a directed edge between two users. Storage keys it on the
//! ordered pair, so a user can like another user at most once.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Directed "like" edge from `source_user_id` to `target_user_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserLike {
    pub source_user_id: UserId,
    pub target_user_id: UserId,
}

impl UserLike {
    pub fn new(source_user_id: UserId, target_user_id: UserId) -> Self {
        Self {
            source_user_id,
            target_user_id,
        }
    }
}

/// Which side of the like edges to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LikePredicate {
    /// Users the caller has liked
    #[default]
    Liked,
    /// Users who have liked the caller
    LikedBy,
}

impl std::fmt::Display for LikePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LikePredicate::Liked => write!(f, "liked"),
            LikePredicate::LikedBy => write!(f, "likedBy"),
        }
    }
}
