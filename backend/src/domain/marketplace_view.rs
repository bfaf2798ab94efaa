//! Marketplace view-model.
//!
//! Owns the fully fetched listing collection, the current page and the
//! create-listing form. Rendering adapters read [`MarketplaceView::table`]
//! and the pagination accessors; they never slice the collection
//! themselves.

use pagination::{Page, PageNumber, PageSize, Paginator};
use tracing::warn;

use crate::domain::ports::{ListingsCommand, ListingsQuery};
use crate::domain::{AuthMode, CreateListingForm, Listing, ListingError};

/// Text of the row shown when there is nothing to list.
pub const NO_LISTINGS: &str = "No listings available.";

/// Listing formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Seller display name.
    pub seller_name: String,
    /// Energy, e.g. `10 kWh`.
    pub energy: String,
    /// Price per kWh, e.g. `$2.50`.
    pub price_per_kwh: String,
    /// Total price, e.g. `$25.00`.
    pub total_price: String,
    /// Location.
    pub location: String,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        Self {
            seller_name: listing.seller_name().to_string(),
            energy: format!("{} kWh", listing.energy().kwh()),
            price_per_kwh: format_money(listing.price_per_kwh().amount()),
            total_price: format_money(listing.total_price()),
            location: listing.location().to_string(),
        }
    }
}

/// One row of the marketplace table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// A listing on the current page.
    Listing(ListingRow),
    /// Shown alone when the collection is empty.
    Placeholder(&'static str),
}

/// Format an amount as dollars with two decimals.
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// State behind the marketplace page.
#[derive(Debug, Clone, Default)]
pub struct MarketplaceView {
    listings: Vec<Listing>,
    page: PageNumber,
    form: CreateListingForm,
}

impl MarketplaceView {
    /// Empty view on page one with the form closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// View over an already fetched collection.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            ..Self::default()
        }
    }

    /// Fetch the collection through `query`.
    ///
    /// On success the collection is replaced and the current page clamped to
    /// the new page count. On failure the previous collection stays in place
    /// and a warning is logged.
    pub async fn refresh(
        &mut self,
        query: &dyn ListingsQuery,
        auth: &AuthMode,
    ) -> Result<usize, ListingError> {
        match query.list(auth).await {
            Ok(listings) => {
                self.listings = listings;
                self.page = self.paginator().clamp(self.page.get());
                Ok(self.listings.len())
            }
            Err(err) => {
                warn!(
                    error = %err,
                    kept = self.listings.len(),
                    "listing refresh failed; keeping previous collection"
                );
                Err(err)
            }
        }
    }

    /// Every listing in the collection.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Pagination arithmetic for the current collection.
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.listings.len(), PageSize::DEFAULT)
    }

    /// Current one-based page.
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Number of pages, never less than one.
    pub fn total_pages(&self) -> usize {
        self.paginator().total_pages()
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self) {
        self.page = self.paginator().next(self.page);
    }

    /// Go back one page, stopping at the first.
    pub fn previous_page(&mut self) {
        self.page = self.paginator().previous(self.page);
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.page = self.paginator().clamp(page);
    }

    /// Listings on the current page.
    pub fn visible(&self) -> &[Listing] {
        self.paginator().slice(&self.listings, self.page)
    }

    /// Current page as a serialisable envelope.
    pub fn current_page(&self) -> Page<Listing> {
        Page::from_slice(&self.listings, self.page, PageSize::DEFAULT)
    }

    /// Rows to render for the current page.
    pub fn table(&self) -> Vec<TableRow> {
        let visible = self.visible();
        if visible.is_empty() {
            return vec![TableRow::Placeholder(NO_LISTINGS)];
        }
        visible
            .iter()
            .map(|listing| TableRow::Listing(ListingRow::from(listing)))
            .collect()
    }

    /// The create-listing form.
    pub fn form(&self) -> &CreateListingForm {
        &self.form
    }

    /// Mutable access to the create-listing form.
    pub fn form_mut(&mut self) -> &mut CreateListingForm {
        &mut self.form
    }

    /// Submit the form and refresh the collection on success.
    ///
    /// A failed refresh after a successful create leaves the view stale
    /// until the next successful fetch.
    pub async fn submit_form(
        &mut self,
        command: &dyn ListingsCommand,
        query: &dyn ListingsQuery,
        auth: &AuthMode,
    ) -> Result<Listing, ListingError> {
        let listing = self.form.submit(command, auth).await?;
        if self.refresh(query, auth).await.is_err() {
            warn!(listing_id = %listing.id(), "created listing not yet visible");
        }
        Ok(listing)
    }
}
