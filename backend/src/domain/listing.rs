//! Energy listing aggregate and its validated field types.
//!
//! A listing is a seller's offer of a quantity of energy at a price per kWh.
//! Listings are created once through [`ListingForm`] validation and never
//! updated by this application. `total_price` is always derived from
//! `energy * price_per_kwh` at creation time.
//!
//! Decision on numeric input: `energy` and `pricePerKwh` must parse as finite
//! decimal numbers. Energy must be strictly positive; the price may be zero
//! (free sharing) but never negative.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Names of the user-editable listing fields, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    /// `sellerId`
    SellerId,
    /// `sellerName`
    SellerName,
    /// `energy`
    Energy,
    /// `pricePerKwh`
    PricePerKwh,
    /// `location`
    Location,
}

impl ListingField {
    /// All editable fields in form order.
    pub const ALL: [Self; 5] = [
        Self::SellerId,
        Self::SellerName,
        Self::Energy,
        Self::PricePerKwh,
        Self::Location,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SellerId => "sellerId",
            Self::SellerName => "sellerName",
            Self::Energy => "energy",
            Self::PricePerKwh => "pricePerKwh",
            Self::Location => "location",
        }
    }

    /// Human-readable label used by forms.
    pub fn label(self) -> &'static str {
        match self {
            Self::SellerId => "Seller ID",
            Self::SellerName => "Seller Name",
            Self::Energy => "Energy (kWh)",
            Self::PricePerKwh => "Price per kWh",
            Self::Location => "Location",
        }
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for listing input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    /// A required field was empty or whitespace.
    #[error("{field} is required")]
    Missing {
        /// Offending field.
        field: ListingField,
    },
    /// A numeric field did not parse as a number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber {
        /// Offending field.
        field: ListingField,
        /// Raw input as submitted.
        value: String,
    },
    /// A numeric field parsed to infinity or NaN.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Offending field.
        field: ListingField,
    },
    /// A numeric field was below its permitted minimum.
    #[error("{field} must be {bound}")]
    OutOfRange {
        /// Offending field.
        field: ListingField,
        /// Description of the permitted range.
        bound: &'static str,
    },
}

impl ListingValidationError {
    /// Field the error refers to.
    pub fn field(&self) -> ListingField {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field, .. }
            | Self::NotFinite { field }
            | Self::OutOfRange { field, .. } => *field,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::NotANumber { .. } => "not_a_number",
            Self::NotFinite { .. } => "not_finite",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

fn required_text(field: ListingField, raw: &str) -> Result<String, ListingValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ListingValidationError::Missing { field });
    }
    Ok(trimmed.to_owned())
}

fn parse_number(field: ListingField, raw: &str) -> Result<f64, ListingValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ListingValidationError::Missing { field });
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ListingValidationError::NotANumber {
            field,
            value: trimmed.to_owned(),
        })?;
    if !value.is_finite() {
        return Err(ListingValidationError::NotFinite { field });
    }
    Ok(value)
}

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident => $field:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value; input is trimmed.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, ListingValidationError> {
                required_text($field, raw.as_ref()).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_field! {
    /// Identifier of the selling party as entered on the form.
    SellerId => ListingField::SellerId
}

text_field! {
    /// Display name of the selling party.
    SellerName => ListingField::SellerName
}

text_field! {
    /// Free-text location of the offered supply.
    Location => ListingField::Location
}

/// Identifier assigned by the listing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    /// Wrap a store-assigned identifier, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.trim().is_empty()).then_some(Self(raw))
    }
}

impl AsRef<str> for ListingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quantity of energy offered, in kWh. Finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EnergyAmount(f64);

impl EnergyAmount {
    /// Validate a numeric amount.
    pub fn new(kwh: f64) -> Result<Self, ListingValidationError> {
        if !kwh.is_finite() {
            return Err(ListingValidationError::NotFinite {
                field: ListingField::Energy,
            });
        }
        if kwh <= 0.0 {
            return Err(ListingValidationError::OutOfRange {
                field: ListingField::Energy,
                bound: "greater than zero",
            });
        }
        Ok(Self(kwh))
    }

    /// Parse form input.
    pub fn parse(raw: &str) -> Result<Self, ListingValidationError> {
        Self::new(parse_number(ListingField::Energy, raw)?)
    }

    /// Amount in kWh.
    pub fn kwh(self) -> f64 {
        self.0
    }
}

/// Price per kWh. Finite and not negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PricePerKwh(f64);

impl PricePerKwh {
    /// Validate a numeric price.
    pub fn new(price: f64) -> Result<Self, ListingValidationError> {
        if !price.is_finite() {
            return Err(ListingValidationError::NotFinite {
                field: ListingField::PricePerKwh,
            });
        }
        if price < 0.0 {
            return Err(ListingValidationError::OutOfRange {
                field: ListingField::PricePerKwh,
                bound: "zero or greater",
            });
        }
        Ok(Self(price))
    }

    /// Parse form input.
    pub fn parse(raw: &str) -> Result<Self, ListingValidationError> {
        Self::new(parse_number(ListingField::PricePerKwh, raw)?)
    }

    /// Price as a plain number.
    pub fn amount(self) -> f64 {
        self.0
    }
}

/// Raw listing input exactly as entered on the create-listing form.
///
/// Every field is a string so the form can be redisplayed verbatim after a
/// failed submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingForm {
    /// Seller identifier.
    pub seller_id: String,
    /// Seller display name.
    pub seller_name: String,
    /// Energy in kWh, as typed.
    pub energy: String,
    /// Price per kWh, as typed.
    pub price_per_kwh: String,
    /// Location description.
    pub location: String,
}

impl ListingForm {
    /// Read a field by name.
    pub fn get(&self, field: ListingField) -> &str {
        match field {
            ListingField::SellerId => &self.seller_id,
            ListingField::SellerName => &self.seller_name,
            ListingField::Energy => &self.energy,
            ListingField::PricePerKwh => &self.price_per_kwh,
            ListingField::Location => &self.location,
        }
    }

    /// Overwrite a field by name.
    pub fn set(&mut self, field: ListingField, value: impl Into<String>) {
        let slot = match field {
            ListingField::SellerId => &mut self.seller_id,
            ListingField::SellerName => &mut self.seller_name,
            ListingField::Energy => &mut self.energy,
            ListingField::PricePerKwh => &mut self.price_per_kwh,
            ListingField::Location => &mut self.location,
        };
        *slot = value.into();
    }

    /// First empty required field, in form order.
    pub fn first_missing(&self) -> Option<ListingField> {
        ListingField::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
    }

    /// Validate every field and stamp `created_at`.
    ///
    /// Required-field checks run first so an empty form reports the first
    /// missing field rather than a numeric parse error.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use powerhub::domain::ListingForm;
    ///
    /// let form = ListingForm {
    ///     seller_id: "seller-1".into(),
    ///     seller_name: "Thandi".into(),
    ///     energy: "10".into(),
    ///     price_per_kwh: "2.5".into(),
    ///     location: "Soweto".into(),
    /// };
    /// let draft = form.validate(Utc::now()).expect("valid form");
    /// assert_eq!(draft.total_price(), 25.0);
    /// ```
    pub fn validate(&self, created_at: DateTime<Utc>) -> Result<NewListing, ListingValidationError> {
        if let Some(field) = self.first_missing() {
            return Err(ListingValidationError::Missing { field });
        }
        Ok(NewListing {
            seller_id: SellerId::new(&self.seller_id)?,
            seller_name: SellerName::new(&self.seller_name)?,
            energy: EnergyAmount::parse(&self.energy)?,
            price_per_kwh: PricePerKwh::parse(&self.price_per_kwh)?,
            location: Location::new(&self.location)?,
            created_at,
        })
    }
}

/// A validated listing that has not yet been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    seller_id: SellerId,
    seller_name: SellerName,
    energy: EnergyAmount,
    price_per_kwh: PricePerKwh,
    location: Location,
    created_at: DateTime<Utc>,
}

impl NewListing {
    /// Assemble a draft from validated parts.
    pub fn new(
        seller_id: SellerId,
        seller_name: SellerName,
        energy: EnergyAmount,
        price_per_kwh: PricePerKwh,
        location: Location,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seller_id,
            seller_name,
            energy,
            price_per_kwh,
            location,
            created_at,
        }
    }

    /// Seller identifier.
    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    /// Seller display name.
    pub fn seller_name(&self) -> &SellerName {
        &self.seller_name
    }

    /// Offered energy.
    pub fn energy(&self) -> EnergyAmount {
        self.energy
    }

    /// Asking price per kWh.
    pub fn price_per_kwh(&self) -> PricePerKwh {
        self.price_per_kwh
    }

    /// Location description.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Submission instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `energy * price_per_kwh`.
    pub fn total_price(&self) -> f64 {
        self.energy.kwh() * self.price_per_kwh.amount()
    }
}

/// A persisted listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    id: ListingId,
    seller_id: SellerId,
    seller_name: SellerName,
    energy: EnergyAmount,
    price_per_kwh: PricePerKwh,
    total_price: f64,
    location: Location,
    created_at: DateTime<Utc>,
}

impl Listing {
    /// Attach a store-assigned id to a draft, deriving the total price.
    pub fn new(id: ListingId, draft: NewListing) -> Self {
        let total_price = draft.total_price();
        Self::from_record(id, draft, total_price)
    }

    /// Rebuild a listing read back from the store, keeping the total price
    /// that was recorded at creation time.
    pub fn from_record(id: ListingId, draft: NewListing, total_price: f64) -> Self {
        let NewListing {
            seller_id,
            seller_name,
            energy,
            price_per_kwh,
            location,
            created_at,
        } = draft;
        Self {
            id,
            seller_id,
            seller_name,
            energy,
            price_per_kwh,
            total_price,
            location,
            created_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Seller identifier.
    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    /// Seller display name.
    pub fn seller_name(&self) -> &SellerName {
        &self.seller_name
    }

    /// Offered energy.
    pub fn energy(&self) -> EnergyAmount {
        self.energy
    }

    /// Asking price per kWh.
    pub fn price_per_kwh(&self) -> PricePerKwh {
        self.price_per_kwh
    }

    /// Total price recorded at creation.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Location description.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Submission instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
