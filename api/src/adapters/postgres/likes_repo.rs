//! PostgreSQL adapter for LikesRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::domain::entities::{
    AppUser, LikePredicate, PageRequest, PagedList, UserId, UserLike,
};
use crate::domain::ports::{ChangeTracker, LikesRepository, PendingChange};
use crate::entity::{user_likes, users};
use crate::error::DomainError;

/// PostgreSQL implementation of LikesRepository
pub struct PostgresLikesRepository {
    db: DatabaseConnection,
    tracker: Arc<ChangeTracker>,
}

impl PostgresLikesRepository {
    pub fn new(db: DatabaseConnection, tracker: Arc<ChangeTracker>) -> Self {
        Self { db, tracker }
    }
}

#[async_trait]
impl LikesRepository for PostgresLikesRepository {
    async fn get_user_like(
        &self,
        source_user_id: UserId,
        target_user_id: UserId,
    ) -> Result<Option<UserLike>, DomainError> {
        let result = user_likes::Entity::find_by_id((source_user_id.0, target_user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn get_user_with_likes(&self, user_id: UserId) -> Result<Option<AppUser>, DomainError> {
        let Some(model) = users::Entity::find_by_id(user_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let likes = user_likes::Entity::find()
            .filter(user_likes::Column::SourceUserId.eq(user_id.0))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut user: AppUser = model.into();
        user.liked_users = likes.into_iter().map(|m| m.into()).collect();
        Ok(Some(user))
    }

    async fn get_user_likes(
        &self,
        user_id: UserId,
        predicate: LikePredicate,
        page: &PageRequest,
    ) -> Result<PagedList<AppUser>, DomainError> {
        // Join from the other end of the edge back to users
        let query = match predicate {
            LikePredicate::Liked => users::Entity::find()
                .join_rev(JoinType::InnerJoin, user_likes::Relation::TargetUser.def())
                .filter(user_likes::Column::SourceUserId.eq(user_id.0)),
            LikePredicate::LikedBy => users::Entity::find()
                .join_rev(JoinType::InnerJoin, user_likes::Relation::SourceUser.def())
                .filter(user_likes::Column::TargetUserId.eq(user_id.0)),
        }
        .order_by_asc(users::Column::UserName);

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

    async fn add_like(&self, like: UserLike) {
        self.tracker.stage(PendingChange::AddLike(like)).await;
    }
}

/// Convert SeaORM model to domain entity
impl From<user_likes::Model> for UserLike {
    fn from(model: user_likes::Model) -> Self {
        UserLike::new(UserId(model.source_user_id), UserId(model.target_user_id))
    }
}
