//! Message handlers
//!
//! Sending, listing and deleting direct messages. All routes act on behalf
//! of the authenticated caller.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::paginated;
use crate::app::{CreateMessageDto, MessageDto};
use crate::auth::CurrentUser;
use crate::domain::entities::{MessageContainer, MessageId, PageRequest};
use crate::domain::ports::UnitOfWorkFactory;
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing messages
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageParams {
    #[serde(default)]
    pub container: MessageContainer,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

/// POST /messages
pub async fn create_message<F: UnitOfWorkFactory>(
    State(state): State<AppState<F>>,
    Extension(user): Extension<CurrentUser>,
    Json(dto): Json<CreateMessageDto>,
) -> Result<Json<MessageDto>, AppError> {
    let message = state
        .message_service
        .create_message(&user.username, dto)
        .await?;

    Ok(Json(message))
}

/// GET /messages
///
/// `container` is one of Unread (default), Inbox or Outbox.
pub async fn get_messages_for_user<F: UnitOfWorkFactory>(
    State(state): State<AppState<F>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<MessageParams>,
) -> Result<Response, AppError> {
    let page = PageRequest::new(params.page_number, params.page_size);
    let messages = state
        .message_service
        .get_messages_for_user(&user.username, params.container, page)
        .await?;

    paginated(messages)
}

/// GET /messages/thread/:username
pub async fn get_message_thread<F: UnitOfWorkFactory>(
    State(state): State<AppState<F>>,
    Extension(user): Extension<CurrentUser>,
    Path(username): Path<String>,
) -> Result<Json<Vec<MessageDto>>, AppError> {
    let thread = state
        .message_service
        .get_message_thread(&user.username, &username)
        .await?;

    Ok(Json(thread))
}

/// DELETE /messages/:id
pub async fn delete_message<F: UnitOfWorkFactory>(
    State(state): State<AppState<F>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .message_service
        .delete_message(&user.username, MessageId(id))
        .await?;

    Ok(StatusCode::OK)
}
