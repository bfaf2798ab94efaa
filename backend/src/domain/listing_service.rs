//! Listing repository service.
//!
//! Implements the [`ListingsQuery`] and [`ListingsCommand`] driving ports on
//! top of a [`ListingStore`]. Creation parses the raw form, derives
//! `total_price`, stamps `created_at` from the injected clock and submits the
//! full record. There is no retry; failures surface as [`ListingError`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{ListingStore, ListingStoreError, ListingsCommand, ListingsQuery};
use crate::domain::{AuthMode, Error, Listing, ListingForm, ListingValidationError};

/// Failures surfaced by listing use-cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    /// Fetching the collection failed. Callers keep their previous data.
    #[error("failed to fetch listings: {0}")]
    Fetch(#[source] ListingStoreError),
    /// The store refused or failed the create call.
    #[error("failed to create listing: {0}")]
    Create(#[source] ListingStoreError),
    /// The form input was incomplete or not numeric.
    #[error("invalid listing: {0}")]
    Validation(#[from] ListingValidationError),
}

impl ListingError {
    /// Underlying store failure, if any.
    pub fn store_error(&self) -> Option<&ListingStoreError> {
        match self {
            Self::Fetch(err) | Self::Create(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

impl From<ListingError> for Error {
    fn from(error: ListingError) -> Self {
        match &error {
            ListingError::Validation(invalid) => Error::invalid_request(invalid.to_string())
                .with_details(json!({
                    "field": invalid.field().as_str(),
                    "code": invalid.code(),
                })),
            ListingError::Fetch(ListingStoreError::Unauthorized { .. })
            | ListingError::Create(ListingStoreError::Unauthorized { .. }) => {
                Error::forbidden(error.to_string())
            }
            ListingError::Fetch(_) | ListingError::Create(_) => {
                Error::service_unavailable(error.to_string())
            }
        }
    }
}

/// Listing service backed by a [`ListingStore`].
#[derive(Clone)]
pub struct ListingService<S: ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: ?Sized> ListingService<S> {
    /// Create a service over `store`, taking timestamps from `clock`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl<S> ListingsQuery for ListingService<S>
where
    S: ListingStore + ?Sized,
{
    async fn list(&self, auth: &AuthMode) -> Result<Vec<Listing>, ListingError> {
        let listings = self.store.list(auth).await.map_err(|err| {
            warn!(auth = auth.label(), error = %err, "listing fetch failed");
            ListingError::Fetch(err)
        })?;
        debug!(auth = auth.label(), count = listings.len(), "fetched listings");
        Ok(listings)
    }
}

#[async_trait]
impl<S> ListingsCommand for ListingService<S>
where
    S: ListingStore + ?Sized,
{
    async fn create(&self, auth: &AuthMode, form: &ListingForm) -> Result<Listing, ListingError> {
        let draft = form.validate(self.clock.utc())?;
        let listing = self.store.create(auth, &draft).await.map_err(|err| {
            warn!(auth = auth.label(), error = %err, "listing create failed");
            ListingError::Create(err)
        })?;
        debug!(
            auth = auth.label(),
            listing_id = %listing.id(),
            total_price = listing.total_price(),
            "created listing"
        );
        Ok(listing)
    }
}
