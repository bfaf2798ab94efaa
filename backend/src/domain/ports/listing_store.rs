//! Driven port for the hosted listing store.
//!
//! The store owns persistence and authorization rules. Adapters translate
//! the caller's [`AuthMode`] into whatever the backing service expects and
//! report failures through [`ListingStoreError`].

use async_trait::async_trait;

use crate::domain::{AuthMode, Listing, NewListing};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing store adapters.
    pub enum ListingStoreError {
        /// The store could not be reached.
        Connection { message: String } => "listing store unreachable: {message}",
        /// The store did not answer within the configured timeout.
        Timeout { message: String } => "listing store timed out: {message}",
        /// The authorization mode is not permitted to perform the operation.
        Unauthorized { message: String } => "listing store refused access: {message}",
        /// The store rejected the request, for example on schema validation.
        Rejected { message: String } => "listing store rejected request: {message}",
        /// The store answered with a payload the adapter could not read.
        Decode { message: String } => "listing store response invalid: {message}",
    }
}

/// Read and create access to persisted listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch every listing visible under `auth`, in store order.
    async fn list(&self, auth: &AuthMode) -> Result<Vec<Listing>, ListingStoreError>;

    /// Persist `listing` and return it with its store-assigned id.
    async fn create(
        &self,
        auth: &AuthMode,
        listing: &NewListing,
    ) -> Result<Listing, ListingStoreError>;
}
