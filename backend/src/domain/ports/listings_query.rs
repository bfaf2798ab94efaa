//! Driving port for reading listings.
//!
//! Inbound adapters and the marketplace view-model depend on this port
//! rather than on a concrete store, so tests can swap in a double.

use async_trait::async_trait;

use crate::domain::{AuthMode, Listing, ListingError};

/// Use-case port for fetching the full listing collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsQuery: Send + Sync {
    /// Fetch every listing visible under `auth`.
    async fn list(&self, auth: &AuthMode) -> Result<Vec<Listing>, ListingError>;
}
