//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`ListingStore`], [`IdentityProvider`]) are implemented by
//! outbound adapters. Driving ports ([`ListingsQuery`], [`ListingsCommand`])
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod listing_store;
mod listings_command;
mod listings_query;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityError, IdentityProvider};
#[cfg(test)]
pub use listing_store::MockListingStore;
pub use listing_store::{ListingStore, ListingStoreError};
#[cfg(test)]
pub use listings_command::MockListingsCommand;
pub use listings_command::ListingsCommand;
#[cfg(test)]
pub use listings_query::MockListingsQuery;
pub use listings_query::ListingsQuery;
