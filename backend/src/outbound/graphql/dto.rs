//! Wire shapes for the hosted GraphQL listing API.
//!
//! Responses decode into these DTOs first and are then mapped into domain
//! listings in one pass.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{
    EnergyAmount, Listing, ListingId, Location, NewListing, PricePerKwh, SellerId, SellerName,
};

pub(super) const LIST_LISTINGS: &str = "query ListListings($limit: Int, $nextToken: String) {
  listListings(limit: $limit, nextToken: $nextToken) {
    items { id sellerId sellerName energy pricePerKwh totalPrice location createdAt }
    nextToken
  }
}";

pub(super) const CREATE_LISTING: &str = "mutation CreateListing($input: CreateListingInput!) {
  createListing(input: $input) {
    id sellerId sellerName energy pricePerKwh totalPrice location createdAt
  }
}";

#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequest<'a> {
    pub(super) query: &'a str,
    pub(super) variables: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlResponse<D> {
    pub(super) data: Option<D>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQlErrorDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GraphQlErrorDto {
    pub(super) message: String,
    pub(super) error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListListingsData {
    pub(super) list_listings: Option<ListingConnectionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListingConnectionDto {
    #[serde(default)]
    pub(super) items: Vec<Option<ListingRecordDto>>,
    pub(super) next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateListingData {
    pub(super) create_listing: Option<ListingRecordDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListingRecordDto {
    pub(super) id: String,
    pub(super) seller_id: String,
    pub(super) seller_name: String,
    pub(super) energy: f64,
    pub(super) price_per_kwh: f64,
    pub(super) total_price: f64,
    pub(super) location: String,
    pub(super) created_at: DateTime<Utc>,
}

impl ListingRecordDto {
    pub(super) fn into_domain(self) -> Result<Listing, String> {
        let id = ListingId::new(self.id).ok_or_else(|| "listing record has a blank id".to_owned())?;
        let describe = |err: &dyn std::fmt::Display| format!("listing {id}: {err}");
        let draft = NewListing::new(
            SellerId::new(&self.seller_id).map_err(|err| describe(&err))?,
            SellerName::new(&self.seller_name).map_err(|err| describe(&err))?,
            EnergyAmount::new(self.energy).map_err(|err| describe(&err))?,
            PricePerKwh::new(self.price_per_kwh).map_err(|err| describe(&err))?,
            Location::new(&self.location).map_err(|err| describe(&err))?,
            self.created_at,
        );
        Ok(Listing::from_record(id, draft, self.total_price))
    }
}

/// Variables for the `createListing` mutation.
pub(super) fn create_variables(listing: &NewListing) -> Value {
    json!({
        "input": {
            "sellerId": listing.seller_id().as_ref(),
            "sellerName": listing.seller_name().as_ref(),
            "energy": whole_or_fraction(listing.energy().kwh()),
            "pricePerKwh": listing.price_per_kwh().amount(),
            "totalPrice": listing.total_price(),
            "location": listing.location().as_ref(),
            "createdAt": listing.created_at().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    })
}

/// Variables for one `listListings` page.
pub(super) fn list_variables(limit: u32, next_token: Option<&str>) -> Value {
    json!({ "limit": limit, "nextToken": next_token })
}

// `energy` is an integer column; whole amounts are sent without a fraction.
fn whole_or_fraction(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        json!(value as i64)
    } else {
        json!(value)
    }
}
