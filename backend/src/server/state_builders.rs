//! Builders that select listing store and identity adapters from settings.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use powerhub::domain::ListingService;
use powerhub::domain::ports::{FixtureIdentityProvider, IdentityProvider, ListingStore};
use powerhub::inbound::http::session_config::BuildMode;
use powerhub::inbound::http::state::HttpState;
use powerhub::outbound::graphql::GraphQlListingStore;
use powerhub::outbound::identity::UserInfoIdentityProvider;
use powerhub::outbound::memory::InMemoryListingStore;

use super::config::{AppSettings, SettingsError};

/// Failures while wiring adapters.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    /// A setting could not be interpreted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP client for an adapter could not be built.
    #[error("failed to build {adapter} client: {source}")]
    Client {
        /// Adapter being built.
        adapter: &'static str,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// Release builds refuse the fixture identity provider.
    #[error("identity_userinfo_url must be set in release builds")]
    MissingIdentityProvider,
}

fn build_listing_store(settings: &AppSettings) -> Result<Arc<dyn ListingStore>, StateBuildError> {
    match settings.store_endpoint()? {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "using hosted listing store");
            let store = GraphQlListingStore::new(
                endpoint,
                settings.request_timeout(),
                settings.store_api_key.clone(),
            )
            .map_err(|source| StateBuildError::Client {
                adapter: "listing store",
                source,
            })?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("store_endpoint not set; listings are kept in memory");
            Ok(Arc::new(InMemoryListingStore::new()))
        }
    }
}

fn build_identity_provider(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<Arc<dyn IdentityProvider>, StateBuildError> {
    match (settings.identity_userinfo_url()?, mode) {
        (Some(endpoint), _) => {
            let provider = UserInfoIdentityProvider::new(endpoint, settings.request_timeout())
                .map_err(|source| StateBuildError::Client {
                    adapter: "identity",
                    source,
                })?;
            Ok(Arc::new(provider))
        }
        (None, BuildMode::Debug) => {
            warn!("identity_userinfo_url not set; every token signs in as the fixture editor");
            Ok(Arc::new(FixtureIdentityProvider))
        }
        (None, BuildMode::Release) => Err(StateBuildError::MissingIdentityProvider),
    }
}

/// Build the HTTP state for the configured adapters.
///
/// # Errors
/// Returns [`StateBuildError`] when a URL is malformed, a client cannot be
/// built, or a release build lacks an identity endpoint.
pub fn build_http_state(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<HttpState, StateBuildError> {
    let store = build_listing_store(settings)?;
    let identity = build_identity_provider(settings, mode)?;
    let service = ListingService::new(store, Arc::new(DefaultClock));
    Ok(HttpState::from_service(Arc::new(service), identity))
}
