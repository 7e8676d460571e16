//! Request and response shapes
//!
//! DTOs are projections of domain entities, decoupled from the storage
//! schema. Mapping is done with `From` conversions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{AppUser, Message};

/// Request body for sending a message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageDto {
    pub recipient_username: String,
    pub content: String,
}

/// A message as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: Uuid,
    pub sender_id: i32,
    pub sender_username: String,
    pub recipient_id: i32,
    pub recipient_username: String,
    pub content: String,
    pub date_read: Option<DateTime<Utc>>,
    pub message_sent: DateTime<Utc>,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.0,
            sender_id: message.sender_id.0,
            sender_username: message.sender_username.clone(),
            recipient_id: message.recipient_id.0,
            recipient_username: message.recipient_username.clone(),
            content: message.content.clone(),
            date_read: message.date_read,
            message_sent: message.message_sent,
        }
    }
}

/// A user on one side of a like edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub id: i32,
    pub username: String,
    pub known_as: Option<String>,
}

impl From<&AppUser> for LikeDto {
    fn from(user: &AppUser) -> Self {
        Self {
            id: user.id.0,
            username: user.username.clone(),
            known_as: user.known_as.clone(),
        }
    }
}
