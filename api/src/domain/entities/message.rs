//! Direct message domain entity
//!
//! Messages snapshot both usernames at send time. Each participant can
//! delete the message from their own side; the row is only removed once
//! both have.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AppUser, UserId};

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MessageId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A direct message between two users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub sender_username: String,
    pub recipient_id: UserId,
    pub recipient_username: String,
    pub content: String,
    pub date_read: Option<DateTime<Utc>>,
    pub message_sent: DateTime<Utc>,
    pub sender_deleted: bool,
    pub recipient_deleted: bool,
}

impl Message {
    /// Build a new, unsent message from `sender` to `recipient`
    pub fn new(sender: &AppUser, recipient: &AppUser, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender_id: sender.id,
            sender_username: sender.username.clone(),
            recipient_id: recipient.id,
            recipient_username: recipient.username.clone(),
            content: content.into(),
            date_read: None,
            message_sent: Utc::now(),
            sender_deleted: false,
            recipient_deleted: false,
        }
    }

    /// Whether `username` sent or received this message
    pub fn involves(&self, username: &str) -> bool {
        self.sender_username == username || self.recipient_username == username
    }

    /// Mark the message deleted on `username`'s side
    pub fn delete_for(&mut self, username: &str) {
        if self.sender_username == username {
            self.sender_deleted = true;
        }
        if self.recipient_username == username {
            self.recipient_deleted = true;
        }
    }

    /// Both participants have deleted it
    pub fn deleted_by_both(&self) -> bool {
        self.sender_deleted && self.recipient_deleted
    }
}

/// Mailbox view used when listing a user's messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContainer {
    #[default]
    #[serde(alias = "unread")]
    Unread,
    #[serde(alias = "inbox")]
    Inbox,
    #[serde(alias = "outbox")]
    Outbox,
}

impl std::fmt::Display for MessageContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageContainer::Unread => write!(f, "Unread"),
            MessageContainer::Inbox => write!(f, "Inbox"),
            MessageContainer::Outbox => write!(f, "Outbox"),
        }
    }
}
