//! Mock implementations of port traits
//!
//! An in-memory unit of work whose repositories read from a shared store
//! and stage writes on a `ChangeTracker`, just like the Postgres adapter.
//! Tests inspect the store afterwards to see what was committed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    normalize_username, AppUser, LikePredicate, Message, MessageContainer, MessageId,
    PageRequest, PagedList, UserId, UserLike,
};
use crate::domain::ports::{
    ChangeTracker, LikesRepository, MessageRepository, PendingChange, UnitOfWork,
    UnitOfWorkFactory, UserRepository,
};
use crate::error::DomainError;

fn paginate<T>(items: Vec<T>, page: &PageRequest) -> PagedList<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.page_size as usize)
        .collect();
    PagedList::new(items, total, page)
}

// ============================================================================
// Shared store
// ============================================================================

#[derive(Default)]
struct InMemoryStore {
    users: RwLock<HashMap<UserId, AppUser>>,
    likes: RwLock<Vec<UserLike>>,
    messages: RwLock<Vec<Message>>,
    /// Number of staged changes seen by each `complete` call
    commits: RwLock<Vec<usize>>,
}

impl InMemoryStore {
    fn user_by_name(&self, username: &str) -> Option<AppUser> {
        let username = normalize_username(username);
        let users = self.users.read().unwrap();
        users.values().find(|u| u.username == username).cloned()
    }

    /// Apply one change, returning the number of rows it touched
    fn apply(&self, change: PendingChange) -> u64 {
        match change {
            PendingChange::AddLike(like) => {
                self.likes.write().unwrap().push(like);
                1
            }
            PendingChange::AddMessage(message) => {
                self.messages.write().unwrap().push(message);
                1
            }
            PendingChange::UpdateMessage(message) => {
                let mut messages = self.messages.write().unwrap();
                match messages.iter_mut().find(|m| m.id == message.id) {
                    Some(existing) => {
                        *existing = message;
                        1
                    }
                    None => 0,
                }
            }
            PendingChange::DeleteMessage(id) => {
                let mut messages = self.messages.write().unwrap();
                let before = messages.len();
                messages.retain(|m| m.id != id);
                (before - messages.len()) as u64
            }
        }
    }
}

// ============================================================================
// In-Memory Unit of Work Factory
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryStore>,
    fail_commits: bool,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: AppUser) -> Self {
        self.store.users.write().unwrap().insert(user.id, user);
        self
    }

    /// Pre-populate with a like edge
    pub fn with_like(self, source: UserId, target: UserId) -> Self {
        self.store
            .likes
            .write()
            .unwrap()
            .push(UserLike::new(source, target));
        self
    }

    /// Pre-populate with a message
    pub fn with_message(self, message: Message) -> Self {
        self.store.messages.write().unwrap().push(message);
        self
    }

    /// Every `complete` call reports that nothing was written
    pub fn failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Committed like edges
    pub fn likes(&self) -> Vec<UserLike> {
        self.store.likes.read().unwrap().clone()
    }

    /// Committed messages
    pub fn messages(&self) -> Vec<Message> {
        self.store.messages.read().unwrap().clone()
    }

    /// Staged change count for each `complete` call, in call order
    pub fn commits(&self) -> Vec<usize> {
        self.store.commits.read().unwrap().clone()
    }
}

impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    type Work = InMemoryUnitOfWork;

    fn begin(&self) -> Self::Work {
        let tracker = Arc::new(ChangeTracker::new());
        InMemoryUnitOfWork {
            store: self.store.clone(),
            tracker: tracker.clone(),
            fail_commits: self.fail_commits,
            users: InMemoryUserRepository {
                store: self.store.clone(),
            },
            likes: InMemoryLikesRepository {
                store: self.store.clone(),
                tracker: tracker.clone(),
            },
            messages: InMemoryMessageRepository {
                store: self.store.clone(),
                tracker,
            },
        }
    }
}

// ============================================================================
// In-Memory Unit of Work
// ============================================================================

pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    tracker: Arc<ChangeTracker>,
    fail_commits: bool,
    users: InMemoryUserRepository,
    likes: InMemoryLikesRepository,
    messages: InMemoryMessageRepository,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    type Users = InMemoryUserRepository;
    type Likes = InMemoryLikesRepository;
    type Messages = InMemoryMessageRepository;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn likes(&self) -> &Self::Likes {
        &self.likes
    }

    fn messages(&self) -> &Self::Messages {
        &self.messages
    }

    async fn complete(&self) -> Result<bool, DomainError> {
        let changes = self.tracker.take().await;
        self.store.commits.write().unwrap().push(changes.len());

        if self.fail_commits || changes.is_empty() {
            return Ok(false);
        }

        let mut rows = 0;
        for change in changes {
            rows += self.store.apply(change);
        }
        Ok(rows > 0)
    }

    async fn has_changes(&self) -> bool {
        self.tracker.has_changes().await
    }
}

// ============================================================================
// In-Memory Repositories
// ============================================================================

pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        Ok(self.store.user_by_name(username))
    }
}

pub struct InMemoryLikesRepository {
    store: Arc<InMemoryStore>,
    tracker: Arc<ChangeTracker>,
}

#[async_trait]
impl LikesRepository for InMemoryLikesRepository {
    async fn get_user_like(
        &self,
        source_user_id: UserId,
        target_user_id: UserId,
    ) -> Result<Option<UserLike>, DomainError> {
        let likes = self.store.likes.read().unwrap();
        Ok(likes
            .iter()
            .find(|l| l.source_user_id == source_user_id && l.target_user_id == target_user_id)
            .copied())
    }

    async fn get_user_with_likes(&self, user_id: UserId) -> Result<Option<AppUser>, DomainError> {
        let user = self.store.users.read().unwrap().get(&user_id).cloned();
        Ok(user.map(|mut user| {
            user.liked_users = self
                .store
                .likes
                .read()
                .unwrap()
                .iter()
                .filter(|l| l.source_user_id == user_id)
                .copied()
                .collect();
            user
        }))
    }

    async fn get_user_likes(
        &self,
        user_id: UserId,
        predicate: LikePredicate,
        page: &PageRequest,
    ) -> Result<PagedList<AppUser>, DomainError> {
        let ids: Vec<UserId> = {
            let likes = self.store.likes.read().unwrap();
            match predicate {
                LikePredicate::Liked => likes
                    .iter()
                    .filter(|l| l.source_user_id == user_id)
                    .map(|l| l.target_user_id)
                    .collect(),
                LikePredicate::LikedBy => likes
                    .iter()
                    .filter(|l| l.target_user_id == user_id)
                    .map(|l| l.source_user_id)
                    .collect(),
            }
        };

        let mut users: Vec<AppUser> = {
            let users = self.store.users.read().unwrap();
            ids.iter().filter_map(|id| users.get(id).cloned()).collect()
        };
        users.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(paginate(users, page))
    }

    async fn add_like(&self, like: UserLike) {
        self.tracker.stage(PendingChange::AddLike(like)).await;
    }
}

pub struct InMemoryMessageRepository {
    store: Arc<InMemoryStore>,
    tracker: Arc<ChangeTracker>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, DomainError> {
        let messages = self.store.messages.read().unwrap();
        Ok(messages.iter().find(|m| m.id == id).cloned())
    }

    async fn get_messages_for_user(
        &self,
        username: &str,
        container: MessageContainer,
        page: &PageRequest,
    ) -> Result<PagedList<Message>, DomainError> {
        let mut matching: Vec<Message> = {
            let messages = self.store.messages.read().unwrap();
            messages
                .iter()
                .filter(|m| match container {
                    MessageContainer::Inbox => {
                        m.recipient_username == username && !m.recipient_deleted
                    }
                    MessageContainer::Outbox => {
                        m.sender_username == username && !m.sender_deleted
                    }
                    MessageContainer::Unread => {
                        m.recipient_username == username
                            && !m.recipient_deleted
                            && m.date_read.is_none()
                    }
                })
                .cloned()
                .collect()
        };
        matching.sort_by(|a, b| b.message_sent.cmp(&a.message_sent));

        Ok(paginate(matching, page))
    }

    async fn get_message_thread(
        &self,
        current_username: &str,
        recipient_username: &str,
    ) -> Result<Vec<Message>, DomainError> {
        let mut thread: Vec<Message> = {
            let messages = self.store.messages.read().unwrap();
            messages
                .iter()
                .filter(|m| {
                    (m.recipient_username == current_username
                        && m.sender_username == recipient_username
                        && !m.recipient_deleted)
                        || (m.sender_username == current_username
                            && m.recipient_username == recipient_username
                            && !m.sender_deleted)
                })
                .cloned()
                .collect()
        };
        thread.sort_by(|a, b| a.message_sent.cmp(&b.message_sent));

        Ok(thread)
    }

    async fn add_message(&self, message: Message) {
        self.tracker.stage(PendingChange::AddMessage(message)).await;
    }

    async fn update_message(&self, message: Message) {
        self.tracker
            .stage(PendingChange::UpdateMessage(message))
            .await;
    }

    async fn delete_message(&self, id: MessageId) {
        self.tracker.stage(PendingChange::DeleteMessage(id)).await;
    }
}
