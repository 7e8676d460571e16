//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod likes;
pub mod messages;

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::entities::PagedList;
use crate::error::AppError;

pub use likes::{add_like, get_user_likes};
pub use messages::{create_message, delete_message, get_message_thread, get_messages_for_user};

pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("pagination");

/// JSON array of the page's items with paging metadata in the
/// `Pagination` header
pub fn paginated<T: Serialize>(list: PagedList<T>) -> Result<Response, AppError> {
    let header = serde_json::to_string(&list.header())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let header = HeaderValue::from_str(&header).map_err(|e| AppError::Internal(e.to_string()))?;

    let mut response = Json(list.items).into_response();
    let headers = response.headers_mut();
    headers.insert(PAGINATION_HEADER, header);
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Pagination"),
    );
    Ok(response)
}
