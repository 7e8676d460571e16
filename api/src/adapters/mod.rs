//! Adapters layer
//!
//! Implementations of the domain ports. PostgreSQL via SeaORM is the only
//! production adapter; tests use `test_utils`.

pub mod postgres;

pub use postgres::PostgresUnitOfWorkFactory;
