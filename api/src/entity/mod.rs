//! SeaORM entities
//!
//! Table definitions mirroring `migrations/`. Domain conversions live in
//! the postgres adapters.

pub mod messages;
pub mod user_likes;
pub mod users;
