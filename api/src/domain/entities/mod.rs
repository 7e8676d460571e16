//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod like;
pub mod message;
pub mod page;
pub mod user;

pub use like::{LikePredicate, UserLike};
pub use message::{Message, MessageContainer, MessageId};
pub use page::{PageRequest, PagedList};
pub use user::{normalize_username, AppUser, UserId};
