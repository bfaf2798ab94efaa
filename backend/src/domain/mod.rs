//! Domain primitives, services and view-models.
//!
//! Purpose: model energy listings, the identity facts the marketplace needs
//! and the state behind the marketplace page, independent of HTTP and of the
//! hosted store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - Listing, NewListing, ListingForm and field newtypes.
//! - SessionState, UserAttributes, AuthMode: identity boundary.
//! - ListingService: implements the listing driving ports.
//! - CreateListingForm, MarketplaceView: marketplace state.

pub mod error;
pub mod listing;
pub mod listing_form;
pub mod listing_service;
pub mod marketplace_view;
pub mod ports;
pub mod session;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    EnergyAmount, Listing, ListingField, ListingForm, ListingId, ListingValidationError,
    Location, NewListing, PricePerKwh, SellerId, SellerName,
};
pub use self::listing_form::CreateListingForm;
pub use self::listing_service::{ListingError, ListingService};
pub use self::marketplace_view::{
    ListingRow, MarketplaceView, NO_LISTINGS, TableRow, format_money,
};
pub use self::session::{
    AccessToken, AuthMode, EDITORS_GROUP, SessionState, UserAttributes, UserPoolCredentials,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use powerhub::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
