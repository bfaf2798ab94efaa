//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IdentityProvider, ListingsCommand, ListingsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub listings: Arc<dyn ListingsQuery>,
    pub listing_commands: Arc<dyn ListingsCommand>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl HttpState {
    /// Construct state from individual ports.
    pub fn new(
        listings: Arc<dyn ListingsQuery>,
        listing_commands: Arc<dyn ListingsCommand>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            listings,
            listing_commands,
            identity,
        }
    }

    /// Construct state from one service implementing both listing ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use powerhub::domain::ListingService;
    /// use powerhub::domain::ports::FixtureIdentityProvider;
    /// use powerhub::inbound::http::state::HttpState;
    /// use powerhub::outbound::memory::InMemoryListingStore;
    ///
    /// let service = ListingService::new(
    ///     Arc::new(InMemoryListingStore::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service), Arc::new(FixtureIdentityProvider));
    /// let _listings = state.listings.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>, identity: Arc<dyn IdentityProvider>) -> Self
    where
        S: ListingsQuery + ListingsCommand + 'static,
    {
        Self::new(service.clone(), service, identity)
    }
}
