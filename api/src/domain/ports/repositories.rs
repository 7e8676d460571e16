//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Reads hit storage directly; writes are staged on the owning unit of
//! work and only reach storage when `UnitOfWork::complete` runs.

use async_trait::async_trait;

use crate::domain::entities::{
    AppUser, LikePredicate, Message, MessageContainer, MessageId, PageRequest, PagedList,
    UserId, UserLike,
};
use crate::error::DomainError;

/// Repository for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username (case-insensitive)
    async fn get_user_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError>;
}

/// Repository for like edges
#[async_trait]
pub trait LikesRepository: Send + Sync {
    /// Find the edge `source -> target`, if any
    async fn get_user_like(
        &self,
        source_user_id: UserId,
        target_user_id: UserId,
    ) -> Result<Option<UserLike>, DomainError>;

    /// Load a user together with their outgoing likes
    async fn get_user_with_likes(&self, user_id: UserId) -> Result<Option<AppUser>, DomainError>;

    /// List the users on one side of `user_id`'s like edges, ordered by username
    async fn get_user_likes(
        &self,
        user_id: UserId,
        predicate: LikePredicate,
        page: &PageRequest,
    ) -> Result<PagedList<AppUser>, DomainError>;

    /// Stage a new edge
    async fn add_like(&self, like: UserLike);
}

/// Repository for direct messages
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by ID
    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, DomainError>;

    /// List a user's messages in one mailbox view, newest first
    async fn get_messages_for_user(
        &self,
        username: &str,
        container: MessageContainer,
        page: &PageRequest,
    ) -> Result<PagedList<Message>, DomainError>;

    /// All messages between two users that `current_username` has not
    /// deleted, oldest first
    async fn get_message_thread(
        &self,
        current_username: &str,
        recipient_username: &str,
    ) -> Result<Vec<Message>, DomainError>;

    /// Stage a new message
    async fn add_message(&self, message: Message);

    /// Stage changes to an existing message
    async fn update_message(&self, message: Message);

    /// Stage removal of a message
    async fn delete_message(&self, id: MessageId);
}
