//! Message service
//!
//! Direct messages between users: sending, mailbox listings, threads and
//! per-participant deletion.

use std::sync::Arc;

use chrono::Utc;

use crate::app::dto::{CreateMessageDto, MessageDto};
use crate::domain::entities::{
    normalize_username, Message, MessageContainer, MessageId, PageRequest, PagedList,
};
use crate::domain::ports::{MessageRepository, UnitOfWork, UnitOfWorkFactory, UserRepository};
use crate::error::AppError;

/// Service for managing direct messages
pub struct MessageService<F>
where
    F: UnitOfWorkFactory,
{
    uow: Arc<F>,
}

impl<F> MessageService<F>
where
    F: UnitOfWorkFactory,
{
    pub fn new(uow: Arc<F>) -> Self {
        Self { uow }
    }

    /// Send a message from `sender_username` to `dto.recipient_username`
    ///
    /// Usernames are compared case-insensitively for the self check.
    pub async fn create_message(
        &self,
        sender_username: &str,
        dto: CreateMessageDto,
    ) -> Result<MessageDto, AppError> {
        if normalize_username(sender_username) == normalize_username(&dto.recipient_username) {
            return Err(AppError::BadRequest(
                "You cannot send messages to yourself".to_string(),
            ));
        }

        let uow = self.uow.begin();

        let sender = uow
            .users()
            .get_user_by_username(sender_username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", sender_username)))?;

        let recipient = uow
            .users()
            .get_user_by_username(&dto.recipient_username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", dto.recipient_username)))?;

        let message = Message::new(&sender, &recipient, dto.content);
        uow.messages().add_message(message.clone()).await;

        if !uow.complete().await? {
            tracing::warn!(
                sender = %message.sender_username,
                recipient = %message.recipient_username,
                "Message was not persisted"
            );
            return Err(AppError::BadRequest(
                "Failed to create message".to_string(),
            ));
        }

        tracing::info!(
            message_id = %message.id,
            sender = %message.sender_username,
            recipient = %message.recipient_username,
            "Message sent"
        );
        Ok(MessageDto::from(&message))
    }

    /// List the caller's messages in one mailbox view
    pub async fn get_messages_for_user(
        &self,
        username: &str,
        container: MessageContainer,
        page: PageRequest,
    ) -> Result<PagedList<MessageDto>, AppError> {
        let uow = self.uow.begin();

        let messages = uow
            .messages()
            .get_messages_for_user(&normalize_username(username), container, &page)
            .await?;

        Ok(messages.map(|m| MessageDto::from(&m)))
    }

    /// Conversation between the caller and `recipient_username`
    ///
    /// Unread messages addressed to the caller are marked read. If the store
    /// rejects the read receipts they are reported unread again.
    pub async fn get_message_thread(
        &self,
        current_username: &str,
        recipient_username: &str,
    ) -> Result<Vec<MessageDto>, AppError> {
        let current = normalize_username(current_username);
        let recipient = normalize_username(recipient_username);
        let uow = self.uow.begin();

        let mut messages = uow
            .messages()
            .get_message_thread(&current, &recipient)
            .await?;

        let now = Utc::now();
        let mut marked = Vec::new();
        for (i, message) in messages.iter_mut().enumerate() {
            if message.date_read.is_none() && message.recipient_username == current {
                message.date_read = Some(now);
                uow.messages().update_message(message.clone()).await;
                marked.push(i);
            }
        }

        if uow.has_changes().await && !uow.complete().await? {
            tracing::warn!(%current, %recipient, "Read receipts were not persisted");
            for i in marked {
                messages[i].date_read = None;
            }
        }

        Ok(messages.iter().map(MessageDto::from).collect())
    }

    /// Delete a message from the caller's side
    ///
    /// The row is removed once both participants have deleted it.
    pub async fn delete_message(&self, username: &str, id: MessageId) -> Result<(), AppError> {
        let username = normalize_username(username);
        let uow = self.uow.begin();

        let mut message = uow
            .messages()
            .get_message(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {}", id)))?;

        if !message.involves(&username) {
            return Err(AppError::Forbidden);
        }

        message.delete_for(&username);

        if message.deleted_by_both() {
            uow.messages().delete_message(message.id).await;
        } else {
            uow.messages().update_message(message).await;
        }

        if !uow.complete().await? {
            return Err(AppError::BadRequest(
                "Problem deleting the message".to_string(),
            ));
        }

        tracing::info!(message_id = %id, %username, "Message deleted");
        Ok(())
    }
}
