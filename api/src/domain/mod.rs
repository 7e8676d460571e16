//! Domain layer
//!
//! Users, like edges, messages and paging, plus the ports the services
//! depend on. Nothing here knows about HTTP or SeaORM.

pub mod entities;
pub mod ports;
