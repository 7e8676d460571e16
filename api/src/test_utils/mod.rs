//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory unit of work is plain Rust over `RwLock`s, so tests can
//! seed it, run a service or the full router against it, and then assert on
//! exactly what was committed.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
