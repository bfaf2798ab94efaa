//! Driving port for creating listings from raw form input.

use async_trait::async_trait;

use crate::domain::{AuthMode, Listing, ListingError, ListingForm};

/// Use-case port for submitting a new listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsCommand: Send + Sync {
    /// Validate `form`, derive the stored fields and persist the listing.
    async fn create(&self, auth: &AuthMode, form: &ListingForm) -> Result<Listing, ListingError>;
}
