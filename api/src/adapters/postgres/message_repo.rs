//! PostgreSQL adapter for MessageRepository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{
    Message, MessageContainer, MessageId, PageRequest, PagedList, UserId,
};
use crate::domain::ports::{ChangeTracker, MessageRepository, PendingChange};
use crate::entity::messages;
use crate::error::DomainError;

/// PostgreSQL implementation of MessageRepository
pub struct PostgresMessageRepository {
    db: DatabaseConnection,
    tracker: Arc<ChangeTracker>,
}

impl PostgresMessageRepository {
    pub fn new(db: DatabaseConnection, tracker: Arc<ChangeTracker>) -> Self {
        Self { db, tracker }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn get_message(&self, id: MessageId) -> Result<Option<Message>, DomainError> {
        let result = messages::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn get_messages_for_user(
        &self,
        username: &str,
        container: MessageContainer,
        page: &PageRequest,
    ) -> Result<PagedList<Message>, DomainError> {
        let query = messages::Entity::find().order_by_desc(messages::Column::MessageSent);

        let query = match container {
            MessageContainer::Inbox => query
                .filter(messages::Column::RecipientUsername.eq(username))
                .filter(messages::Column::RecipientDeleted.eq(false)),
            MessageContainer::Outbox => query
                .filter(messages::Column::SenderUsername.eq(username))
                .filter(messages::Column::SenderDeleted.eq(false)),
            MessageContainer::Unread => query
                .filter(messages::Column::RecipientUsername.eq(username))
                .filter(messages::Column::RecipientDeleted.eq(false))
                .filter(messages::Column::DateRead.is_null()),
        };

        let paginator = query.paginate(&self.db, page.page_size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let results = paginator
            .fetch_page(page.page_number.saturating_sub(1))
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(PagedList::new(
            results.into_iter().map(|m| m.into()).collect(),
            total,
            page,
        ))
    }

    async fn get_message_thread(
        &self,
        current_username: &str,
        recipient_username: &str,
    ) -> Result<Vec<Message>, DomainError> {
        let received = Condition::all()
            .add(messages::Column::RecipientUsername.eq(current_username))
            .add(messages::Column::RecipientDeleted.eq(false))
            .add(messages::Column::SenderUsername.eq(recipient_username));
        let sent = Condition::all()
            .add(messages::Column::SenderUsername.eq(current_username))
            .add(messages::Column::SenderDeleted.eq(false))
            .add(messages::Column::RecipientUsername.eq(recipient_username));

        let results = messages::Entity::find()
            .filter(Condition::any().add(received).add(sent))
            .order_by_asc(messages::Column::MessageSent)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
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

/// Fully populated active model, used for both insert and update
pub(super) fn to_active_model(message: &Message) -> messages::ActiveModel {
    messages::ActiveModel {
        id: Set(message.id.0),
        sender_id: Set(message.sender_id.0),
        sender_username: Set(message.sender_username.clone()),
        recipient_id: Set(message.recipient_id.0),
        recipient_username: Set(message.recipient_username.clone()),
        content: Set(message.content.clone()),
        date_read: Set(message.date_read.map(|d| d.fixed_offset())),
        message_sent: Set(message.message_sent.fixed_offset()),
        sender_deleted: Set(message.sender_deleted),
        recipient_deleted: Set(message.recipient_deleted),
    }
}

/// Convert SeaORM model to domain entity
impl From<messages::Model> for Message {
    fn from(model: messages::Model) -> Self {
        Message {
            id: MessageId(model.id),
            sender_id: UserId(model.sender_id),
            sender_username: model.sender_username,
            recipient_id: UserId(model.recipient_id),
            recipient_username: model.recipient_username,
            content: model.content,
            date_read: model.date_read.map(|d| d.with_timezone(&Utc)),
            message_sent: model.message_sent.with_timezone(&Utc),
            sender_deleted: model.sender_deleted,
            recipient_deleted: model.recipient_deleted,
        }
    }
}
