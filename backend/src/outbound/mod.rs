//! Outbound adapters implementing the catalogue repository ports.
//!
//! - [`memory`]: process-local store used when no database is configured.
//! - [`persistence`]: PostgreSQL repositories built on Diesel.
//!
//! Adapters translate between domain records and storage representations
//! and contain no business rules beyond referential checks on write.

pub mod memory;
pub mod persistence;
