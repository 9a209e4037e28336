//! Course and teacher catalogue service.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] holds entities,
//! ports and use-cases; [`inbound`] adapts HTTP requests onto the driving
//! ports; [`outbound`] provides the in-memory and PostgreSQL stores.

pub mod catalogue_seed;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
