//! GraphQL outbound adapter for the hosted listing store.

mod dto;
mod http_store;

pub use http_store::GraphQlListingStore;
