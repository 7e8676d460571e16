//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod likes_repo;
pub mod message_repo;
pub mod unit_of_work;
pub mod user_repo;


use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

pub use likes_repo::PostgresLikesRepository;
pub use message_repo::PostgresMessageRepository;
pub use unit_of_work::PostgresUnitOfWorkFactory;
pub use user_repo::PostgresUserRepository;

/// Map a commit failure, surfacing unique-key races as conflicts
pub(crate) fn db_error(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Database(e.to_string()),
    }
}
