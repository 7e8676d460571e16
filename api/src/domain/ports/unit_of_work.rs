//! Unit of work port
//!
//! A unit of work groups the repositories used by one request and commits
//! every staged write in a single transaction.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{LikesRepository, MessageRepository, UserRepository};
use crate::domain::entities::{Message, MessageId, UserLike};
use crate::error::DomainError;

/// A write waiting for `UnitOfWork::complete`
#[derive(Debug, Clone, PartialEq)]
pub enum PendingChange {
    AddLike(UserLike),
    AddMessage(Message),
    UpdateMessage(Message),
    DeleteMessage(MessageId),
}

/// Ordered buffer of staged writes, shared by a unit of work and its
/// repositories
#[derive(Debug, Default)]
pub struct ChangeTracker {
    pending: Mutex<Vec<PendingChange>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stage(&self, change: PendingChange) {
        self.pending.lock().await.push(change);
    }

    /// Drain everything staged so far
    pub async fn take(&self) -> Vec<PendingChange> {
        std::mem::take(&mut *self.pending.lock().await)
    }

    pub async fn has_changes(&self) -> bool {
        !self.pending.lock().await.is_empty()
    }
}

/// Transactional boundary over the repositories
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Users: UserRepository;
    type Likes: LikesRepository;
    type Messages: MessageRepository;

    fn users(&self) -> &Self::Users;

    fn likes(&self) -> &Self::Likes;

    fn messages(&self) -> &Self::Messages;

    /// Commit all staged writes.
    ///
    /// Returns `true` when at least one row was written. Nothing staged, or
    /// a store that accepted none of the writes, yields `false`.
    async fn complete(&self) -> Result<bool, DomainError>;

    /// Whether anything is staged
    async fn has_changes(&self) -> bool;
}

/// Opens a fresh unit of work for each request
pub trait UnitOfWorkFactory: Send + Sync + 'static {
    type Work: UnitOfWork;

    fn begin(&self) -> Self::Work;
}
