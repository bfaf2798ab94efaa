//! Power Hub backend library modules.
//!
//! - [`domain`]: listings, identity facts and marketplace state.
//! - [`inbound`]: HTML pages and the JSON API.
//! - [`outbound`]: listing store and identity adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
