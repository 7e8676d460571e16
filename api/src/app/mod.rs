//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services open a unit of work per call, validate, stage and commit.

pub mod dto;
pub mod likes_service;
pub mod message_service;

pub use dto::{CreateMessageDto, LikeDto, MessageDto};
pub use likes_service::LikesService;
pub use message_service::MessageService;
