//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the domain crates:
//! - Cryptographic utilities (random codes, Base64, constant-time compare)
//! - Cookie building and parsing
//! - In-memory TTL cache
//! - Outbound mail (SMTP and log-only transports)
//! - Template rendering

pub mod cookie;
pub mod crypto;
pub mod mail;
pub mod template;
pub mod ttl_cache;
