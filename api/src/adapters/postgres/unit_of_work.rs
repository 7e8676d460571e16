//! PostgreSQL unit of work
//!
//! Repositories stage writes on a shared `ChangeTracker`; `complete` replays
//! them in order inside one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, Set,
    TransactionTrait,
};

use super::message_repo::to_active_model;
use super::{db_error, PostgresLikesRepository, PostgresMessageRepository, PostgresUserRepository};
use crate::domain::ports::{ChangeTracker, PendingChange, UnitOfWork, UnitOfWorkFactory};
use crate::entity::{messages, user_likes};
use crate::error::DomainError;

/// Opens a `PostgresUnitOfWork` per request over a pooled connection
#[derive(Clone)]
pub struct PostgresUnitOfWorkFactory {
    db: DatabaseConnection,
}

impl PostgresUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UnitOfWorkFactory for PostgresUnitOfWorkFactory {
    type Work = PostgresUnitOfWork;

    fn begin(&self) -> PostgresUnitOfWork {
        PostgresUnitOfWork::new(self.db.clone())
    }
}

pub struct PostgresUnitOfWork {
    db: DatabaseConnection,
    tracker: Arc<ChangeTracker>,
    users: PostgresUserRepository,
    likes: PostgresLikesRepository,
    messages: PostgresMessageRepository,
}

impl PostgresUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        let tracker = Arc::new(ChangeTracker::new());
        Self {
            users: PostgresUserRepository::new(db.clone()),
            likes: PostgresLikesRepository::new(db.clone(), tracker.clone()),
            messages: PostgresMessageRepository::new(db.clone(), tracker.clone()),
            tracker,
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    type Users = PostgresUserRepository;
    type Likes = PostgresLikesRepository;
    type Messages = PostgresMessageRepository;

    fn users(&self) -> &PostgresUserRepository {
        &self.users
    }

    fn likes(&self) -> &PostgresLikesRepository {
        &self.likes
    }

    fn messages(&self) -> &PostgresMessageRepository {
        &self.messages
    }

    async fn complete(&self) -> Result<bool, DomainError> {
        let changes = self.tracker.take().await;
        if changes.is_empty() {
            return Ok(false);
        }

        // Dropping the transaction on an early return rolls it back
        let txn = self.db.begin().await.map_err(db_error)?;
        let mut rows = 0;
        for change in changes {
            rows += apply(&txn, change).await.map_err(db_error)?;
        }
        txn.commit().await.map_err(db_error)?;

        tracing::debug!(rows, "Unit of work committed");
        Ok(rows > 0)
    }

    async fn has_changes(&self) -> bool {
        self.tracker.has_changes().await
    }
}

/// Write one staged change, returning the number of rows it touched
async fn apply(txn: &DatabaseTransaction, change: PendingChange) -> Result<u64, DbErr> {
    match change {
        PendingChange::AddLike(like) => {
            user_likes::ActiveModel {
                source_user_id: Set(like.source_user_id.0),
                target_user_id: Set(like.target_user_id.0),
            }
            .insert(txn)
            .await?;
            Ok(1)
        }
        PendingChange::AddMessage(message) => {
            to_active_model(&message).insert(txn).await?;
            Ok(1)
        }
        PendingChange::UpdateMessage(message) => match to_active_model(&message).update(txn).await
        {
            Ok(_) => Ok(1),
            Err(DbErr::RecordNotUpdated) => Ok(0),
            Err(e) => Err(e),
        },
        PendingChange::DeleteMessage(id) => {
            let result = messages::Entity::delete_by_id(id.0).exec(txn).await?;
            Ok(result.rows_affected)
        }
    }
}
