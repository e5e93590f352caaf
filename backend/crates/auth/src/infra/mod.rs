//! Infrastructure Layer
//!
//! Database implementations and in-process stores.

pub mod memory;
pub mod postgres;

pub use memory::{AuthCaches, CacheSweepers};
pub use postgres::PgUserRepository;
