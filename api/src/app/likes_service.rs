//! Likes service
//!
//! Records directed "like" edges between users and lists them.

use std::sync::Arc;

use crate::app::dto::LikeDto;
use crate::domain::entities::{LikePredicate, PageRequest, PagedList, UserId, UserLike};
use crate::domain::ports::{LikesRepository, UnitOfWork, UnitOfWorkFactory, UserRepository};
use crate::error::AppError;

/// Service for managing likes
pub struct LikesService<F>
where
    F: UnitOfWorkFactory,
{
    uow: Arc<F>,
}

impl<F> LikesService<F>
where
    F: UnitOfWorkFactory,
{
    pub fn new(uow: Arc<F>) -> Self {
        Self { uow }
    }

    /// Like `username` on behalf of `source_user_id`
    ///
    /// The target is resolved before the self check, so an unknown username
    /// is always NotFound even when it matches the caller's own name.
    pub async fn add_like(&self, source_user_id: UserId, username: &str) -> Result<(), AppError> {
        let uow = self.uow.begin();

        let liked_user = uow
            .users()
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))?;

        let mut source_user = uow
            .likes()
            .get_user_with_likes(source_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", source_user_id)))?;

        if liked_user.id == source_user.id {
            return Err(AppError::BadRequest(
                "You cannot like yourself".to_string(),
            ));
        }

        if uow
            .likes()
            .get_user_like(source_user.id, liked_user.id)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "You already like this user".to_string(),
            ));
        }

        let like = UserLike::new(source_user.id, liked_user.id);
        source_user.liked_users.push(like);
        uow.likes().add_like(like).await;

        if !uow.complete().await? {
            tracing::warn!(
                source_user_id = %source_user.id,
                target_user_id = %liked_user.id,
                "Like was not persisted"
            );
            return Err(AppError::BadRequest("Failed to like user".to_string()));
        }

        tracing::info!(
            source = %source_user.username,
            target = %liked_user.username,
            "User liked"
        );
        Ok(())
    }

    /// List users on one side of `user_id`'s like edges
    pub async fn get_user_likes(
        &self,
        user_id: UserId,
        predicate: LikePredicate,
        page: PageRequest,
    ) -> Result<PagedList<LikeDto>, AppError> {
        let uow = self.uow.begin();

        let users = uow
            .likes()
            .get_user_likes(user_id, predicate, &page)
            .await?;

        Ok(users.map(|u| LikeDto::from(&u)))
    }
}
