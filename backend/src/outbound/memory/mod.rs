//! Process-local listing store.
//!
//! Emulates the hosted store closely enough for local development and
//! behavioural tests: reads are limited to members of the `EDITORS` group,
//! creates require a signed-in owner, `energy` must be a whole number, and
//! ids are assigned on insert.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{ListingStore, ListingStoreError};
use crate::domain::{AuthMode, EDITORS_GROUP, Listing, ListingId, NewListing};

#[derive(Debug, Clone)]
struct StoredListing {
    owner: String,
    listing: Listing,
}

/// In-memory [`ListingStore`].
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    records: Mutex<Vec<StoredListing>>,
}

impl InMemoryListingStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `listings`, owned by `owner`.
    pub fn seeded(owner: &str, listings: impl IntoIterator<Item = Listing>) -> Self {
        let records = listings
            .into_iter()
            .map(|listing| StoredListing {
                owner: owner.to_owned(),
                listing,
            })
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of stored listings, regardless of visibility.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Listings created by `subject`.
    pub fn owned_by(&self, subject: &str) -> Vec<Listing> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| record.owner == subject)
            .map(|record| record.listing.clone())
            .collect()
    }

    /// Whether the store holds no listings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn list(&self, auth: &AuthMode) -> Result<Vec<Listing>, ListingStoreError> {
        let permitted = matches!(
            auth,
            AuthMode::UserPool(credentials) if credentials.attributes().in_group(EDITORS_GROUP)
        );
        if !permitted {
            return Err(ListingStoreError::unauthorized(format!(
                "{} mode may not read listings without membership of {EDITORS_GROUP}",
                auth.label()
            )));
        }
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.iter().map(|record| record.listing.clone()).collect())
    }

    async fn create(
        &self,
        auth: &AuthMode,
        listing: &NewListing,
    ) -> Result<Listing, ListingStoreError> {
        let AuthMode::UserPool(credentials) = auth else {
            return Err(ListingStoreError::unauthorized(
                "create requires a signed-in owner",
            ));
        };
        if listing.energy().kwh().fract() != 0.0 {
            return Err(ListingStoreError::rejected(
                "Variable 'energy' has an invalid value: expected an integer",
            ));
        }

        let id = ListingId::new(Uuid::new_v4().to_string())
            .ok_or_else(|| ListingStoreError::decode("generated a blank listing id"))?;
        let created = Listing::new(id, listing.clone());
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredListing {
                owner: credentials.subject().to_owned(),
                listing: created.clone(),
            });
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccessToken, ListingForm, UserAttributes};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn draft(energy: &str) -> NewListing {
        ListingForm {
            seller_id: "seller-1".into(),
            seller_name: "Thandi".into(),
            energy: energy.into(),
            price_per_kwh: "2.5".into(),
            location: "Soweto".into(),
        }
        .validate(Utc::now())
        .expect("valid form")
    }

    fn user(groups: &[&str]) -> AuthMode {
        let attributes = groups
            .iter()
            .fold(UserAttributes::new("owner-1"), |acc, group| acc.with_group(*group));
        AuthMode::user_pool(attributes, AccessToken::new("token").expect("token"))
    }

    #[fixture]
    fn editor() -> AuthMode {
        user(&[EDITORS_GROUP])
    }

    #[rstest]
    #[tokio::test]
    async fn editors_read_what_owners_create(editor: AuthMode) {
        let store = InMemoryListingStore::new();
        let created = store.create(&editor, &draft("10")).await.expect("create");
        assert_eq!(created.total_price(), 25.0);

        let listed = store.list(&editor).await.expect("list");
        assert_eq!(listed, vec![created]);
    }

    #[rstest]
    #[tokio::test]
    async fn non_editors_may_create_but_not_read() {
        let store = InMemoryListingStore::new();
        let auth = user(&[]);
        store.create(&auth, &draft("10")).await.expect("owner create");

        let error = store.list(&auth).await.expect_err("not an editor");
        assert!(matches!(error, ListingStoreError::Unauthorized { .. }));
        assert_eq!(store.owned_by("owner-1").len(), 1);
        assert!(store.owned_by("someone-else").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn api_key_mode_is_refused() {
        let store = InMemoryListingStore::new();
        assert!(store.list(&AuthMode::ApiKey).await.is_err());
        assert!(store.create(&AuthMode::ApiKey, &draft("10")).await.is_err());
        assert!(store.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fractional_energy_is_rejected_by_the_schema(editor: AuthMode) {
        let store = InMemoryListingStore::new();
        let error = store
            .create(&editor, &draft("2.5"))
            .await
            .expect_err("integer column");
        assert!(matches!(error, ListingStoreError::Rejected { .. }));
    }
}
