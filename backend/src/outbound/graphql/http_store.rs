//! Reqwest-backed listing store speaking the hosted GraphQL API.
//!
//! This adapter owns transport details only: request authorisation headers,
//! timeout and HTTP error mapping, GraphQL `errors[]` mapping, `nextToken`
//! continuation and JSON decoding into domain listings.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::{
    CREATE_LISTING, CreateListingData, GraphQlErrorDto, GraphQlRequest, GraphQlResponse,
    LIST_LISTINGS, ListListingsData, create_variables, list_variables,
};
use crate::domain::ports::{ListingStore, ListingStoreError};
use crate::domain::{AuthMode, Listing, NewListing};

const API_KEY_HEADER: &str = "x-api-key";
const LIST_PAGE_LIMIT: u32 = 100;

/// Listing store adapter that posts GraphQL operations to one endpoint.
pub struct GraphQlListingStore {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GraphQlListingStore {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout. `api_key` is used for [`AuthMode::ApiKey`] calls.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        api_key: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    async fn execute<D: DeserializeOwned>(
        &self,
        auth: &AuthMode,
        query: &str,
        variables: Value,
    ) -> Result<D, ListingStoreError> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GraphQlRequest { query, variables });
        let request = match auth {
            AuthMode::UserPool(credentials) => request.header(
                reqwest::header::AUTHORIZATION,
                credentials.token().expose(),
            ),
            AuthMode::ApiKey => {
                let key = self.api_key.as_deref().ok_or_else(|| {
                    ListingStoreError::unauthorized("no API key configured for apiKey mode")
                })?;
                request.header(API_KEY_HEADER, key)
            }
        };

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_response(body.as_ref())
    }
}

#[async_trait]
impl ListingStore for GraphQlListingStore {
    async fn list(&self, auth: &AuthMode) -> Result<Vec<Listing>, ListingStoreError> {
        let mut listings = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let data: ListListingsData = self
                .execute(
                    auth,
                    LIST_LISTINGS,
                    list_variables(LIST_PAGE_LIMIT, next_token.as_deref()),
                )
                .await?;
            let connection = data
                .list_listings
                .ok_or_else(|| ListingStoreError::decode("listListings returned null"))?;
            for record in connection.items.into_iter().flatten() {
                let listing_id = record.id.clone();
                match record.into_domain() {
                    Ok(listing) => listings.push(listing),
                    Err(error) => {
                        warn!(
                            %listing_id,
                            %error,
                            "skipping stored listing that fails validation"
                        );
                    }
                }
            }
            match connection.next_token {
                Some(token) if next_token.as_deref() != Some(token.as_str()) => {
                    next_token = Some(token);
                }
                _ => break,
            }
        }
        debug!(count = listings.len(), "listed listings from GraphQL store");
        Ok(listings)
    }

    async fn create(
        &self,
        auth: &AuthMode,
        listing: &NewListing,
    ) -> Result<Listing, ListingStoreError> {
        let data: CreateListingData = self
            .execute(auth, CREATE_LISTING, create_variables(listing))
            .await?;
        data.create_listing
            .ok_or_else(|| ListingStoreError::decode("createListing returned null"))?
            .into_domain()
            .map_err(ListingStoreError::decode)
    }
}

fn parse_response<D: DeserializeOwned>(body: &[u8]) -> Result<D, ListingStoreError> {
    let decoded: GraphQlResponse<D> = serde_json::from_slice(body).map_err(|error| {
        ListingStoreError::decode(format!("invalid GraphQL JSON payload: {error}"))
    })?;
    if let Some(error) = map_graphql_errors(&decoded.errors) {
        return Err(error);
    }
    decoded
        .data
        .ok_or_else(|| ListingStoreError::decode("GraphQL response carried no data"))
}

fn map_graphql_errors(errors: &[GraphQlErrorDto]) -> Option<ListingStoreError> {
    let first = errors.first()?;
    let message = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    let unauthorized = first.error_type.as_deref().is_some_and(|kind| {
        kind.contains("Unauthorized") || kind.contains("AccessDenied")
    });
    Some(if unauthorized {
        ListingStoreError::unauthorized(message)
    } else {
        ListingStoreError::rejected(message)
    })
}

fn map_transport_error(error: reqwest::Error) -> ListingStoreError {
    if error.is_timeout() {
        ListingStoreError::timeout(error.to_string())
    } else {
        ListingStoreError::connection(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ListingStoreError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ListingStoreError::unauthorized(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ListingStoreError::timeout(message)
        }
        _ if status.is_client_error() => ListingStoreError::rejected(message),
        _ => ListingStoreError::connection(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests;
