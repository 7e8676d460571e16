//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::entities::{normalize_username, AppUser, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_user_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::UserName.eq(normalize_username(username)))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for AppUser {
    fn from(model: users::Model) -> Self {
        AppUser {
            id: UserId(model.id),
            username: model.user_name,
            known_as: model.known_as,
            created_at: model.created_at.with_timezone(&Utc),
            last_active: model.last_active.with_timezone(&Utc),
            liked_users: vec![],
        }
    }
}
