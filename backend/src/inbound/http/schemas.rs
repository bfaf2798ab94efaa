//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa when generating OpenAPI"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The listing store could not serve the request.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "invalid listing: energy must be a number")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, e.g. `{"field":"energy","code":"not_a_number"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Listing`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Listing)]
#[serde(rename_all = "camelCase")]
pub struct ListingSchema {
    /// Identifier assigned by the store.
    #[schema(example = "6c1f7d9e-1a52-4a0e-8d0b-3c2b5f8e9a10")]
    id: String,
    #[schema(example = "seller-42")]
    seller_id: String,
    #[schema(example = "Thandi Nkosi")]
    seller_name: String,
    /// Energy offered, in kWh.
    #[schema(example = 10.0)]
    energy: f64,
    #[schema(example = 2.5)]
    price_per_kwh: f64,
    /// `energy * pricePerKwh`, fixed at creation.
    #[schema(example = 25.0)]
    total_price: f64,
    #[schema(example = "Soweto")]
    location: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::ListingForm`].
///
/// Raw form values. Numbers are sent as text and validated server-side.
#[derive(ToSchema)]
#[schema(as = crate::domain::ListingForm)]
#[serde(rename_all = "camelCase")]
pub struct ListingFormSchema {
    #[schema(example = "seller-42")]
    seller_id: String,
    #[schema(example = "Thandi Nkosi")]
    seller_name: String,
    #[schema(example = "10")]
    energy: String,
    #[schema(example = "2.5")]
    price_per_kwh: String,
    #[schema(example = "Soweto")]
    location: String,
}

/// OpenAPI schema for `pagination::PageLinks`.
#[derive(ToSchema)]
#[schema(as = pagination::PageLinks)]
pub struct PageLinksSchema {
    #[serde(rename = "self")]
    #[schema(example = "https://powerhub.example/api/v1/listings?page=2")]
    self_: String,
    previous: Option<String>,
    next: Option<String>,
}

/// OpenAPI schema for a page of listings.
#[derive(ToSchema)]
#[schema(as = ListingPage)]
#[serde(rename_all = "camelCase")]
pub struct ListingPageSchema {
    items: Vec<ListingSchema>,
    #[schema(example = 1, minimum = 1)]
    page: usize,
    #[schema(example = 10)]
    page_size: usize,
    total_items: usize,
    #[schema(minimum = 1)]
    total_pages: usize,
    has_previous: bool,
    has_next: bool,
    links: Option<PageLinksSchema>,
}

/// OpenAPI schema for [`crate::domain::UserAttributes`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserAttributes)]
pub struct UserAttributesSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    subject: String,
    email: Option<String>,
    name: Option<String>,
    #[schema(example = json!(["EDITORS"]))]
    groups: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::SessionState`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SessionState)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SessionStateSchema {
    /// A user is signed in.
    SignedIn { attributes: UserAttributesSchema },
    /// Nobody is signed in.
    SignedOut,
}
