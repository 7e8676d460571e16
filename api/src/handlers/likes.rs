//! Like handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Extension,
};
use serde::Deserialize;

use super::paginated;
use crate::auth::CurrentUser;
use crate::domain::entities::{LikePredicate, PageRequest};
use crate::domain::ports::UnitOfWorkFactory;
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing likes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesParams {
    #[serde(default)]
    pub predicate: LikePredicate,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

/// POST /likes/:username
///
/// Like another user. Answers 200 with an empty body.
pub async fn add_like<F: UnitOfWorkFactory>(
    State(state): State<AppState<F>>,
    Extension(user): Extension<CurrentUser>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    state.likes_service.add_like(user.id, &username).await?;
    Ok(StatusCode::OK)
}

/// GET /likes
pub async fn get_user_likes<F: UnitOfWorkFactory>(
    State(state): State<AppState<F>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<LikesParams>,
) -> Result<Response, AppError> {
    let page = PageRequest::new(params.page_number, params.page_size);
    let likes = state
        .likes_service
        .get_user_likes(user.id, params.predicate, page)
        .await?;

    paginated(likes)
}
