//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **graphql**: reqwest-backed listing store for the hosted GraphQL API
//! - **memory**: process-local listing store for development and tests
//! - **identity**: OIDC userinfo identity provider
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod graphql;
pub mod identity;
pub mod memory;
