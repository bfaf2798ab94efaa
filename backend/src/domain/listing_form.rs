//! Create-listing form controller.
//!
//! The form is either closed or open with the values typed so far and the
//! outcome of the last failed submission. A successful submission closes the
//! form and drops its values; a failed one keeps both the form and the values
//! so the user can correct and resubmit.

use tracing::{info, warn};

use crate::domain::ports::ListingsCommand;
use crate::domain::{AuthMode, Listing, ListingError, ListingField, ListingForm, ListingValidationError};

/// State of the create-listing modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CreateListingForm {
    /// Modal hidden.
    #[default]
    Closed,
    /// Modal shown.
    Open {
        /// Values entered so far.
        fields: ListingForm,
        /// Failure from the most recent submission.
        error: Option<ListingError>,
    },
}

impl CreateListingForm {
    /// An open form pre-filled with `fields`.
    pub fn filled(fields: ListingForm) -> Self {
        Self::Open { fields, error: None }
    }

    /// Show the modal with empty fields. Opening an open form keeps its
    /// values.
    pub fn open(&mut self) {
        if matches!(self, Self::Closed) {
            *self = Self::filled(ListingForm::default());
        }
    }

    /// Hide the modal and discard its values.
    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// Whether the modal is shown.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Current values, when open.
    pub fn fields(&self) -> Option<&ListingForm> {
        match self {
            Self::Open { fields, .. } => Some(fields),
            Self::Closed => None,
        }
    }

    /// Failure from the most recent submission, when open.
    pub fn error(&self) -> Option<&ListingError> {
        match self {
            Self::Open { error, .. } => error.as_ref(),
            Self::Closed => None,
        }
    }

    /// Update one field. Returns `false` when the form is closed.
    pub fn set_field(&mut self, field: ListingField, value: impl Into<String>) -> bool {
        match self {
            Self::Open { fields, .. } => {
                fields.set(field, value);
                true
            }
            Self::Closed => false,
        }
    }

    /// Submit the current values through `command`.
    ///
    /// Empty fields are rejected before the command is called. On success
    /// the form closes; on failure it stays open with its values and the
    /// error is recorded. A closed form has nothing to submit and reports
    /// the first required field as missing without changing state.
    pub async fn submit(
        &mut self,
        command: &dyn ListingsCommand,
        auth: &AuthMode,
    ) -> Result<Listing, ListingError> {
        let Self::Open { fields, error } = self else {
            return Err(ListingError::Validation(ListingValidationError::Missing {
                field: ListingField::SellerId,
            }));
        };

        let outcome = match fields.first_missing() {
            Some(field) => Err(ListingError::Validation(ListingValidationError::Missing {
                field,
            })),
            None => command.create(auth, fields).await,
        };

        match outcome {
            Ok(listing) => {
                info!(listing_id = %listing.id(), "listing submitted");
                *self = Self::Closed;
                Ok(listing)
            }
            Err(err) => {
                warn!(error = %err, "listing submission failed");
                *error = Some(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ListingStoreError, MockListingsCommand};
    use crate::domain::{AccessToken, ListingId, UserAttributes};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn auth() -> AuthMode {
        AuthMode::user_pool(
            UserAttributes::new("owner-1"),
            AccessToken::new("token").expect("token"),
        )
    }

    fn complete(form: &mut CreateListingForm) {
        for (field, value) in [
            (ListingField::SellerId, "seller-1"),
            (ListingField::SellerName, "Thandi"),
            (ListingField::Energy, "10"),
            (ListingField::PricePerKwh, "2.5"),
            (ListingField::Location, "Soweto"),
        ] {
            assert!(form.set_field(field, value));
        }
    }

    fn created(fields: &ListingForm) -> Listing {
        let draft = fields.validate(Utc::now()).expect("valid form");
        Listing::new(ListingId::new("listing-1").expect("id"), draft)
    }

    #[rstest]
    fn open_and_cancel_toggle_visibility() {
        let mut form = CreateListingForm::default();
        assert!(!form.is_open());
        assert!(!form.set_field(ListingField::Location, "Soweto"));

        form.open();
        assert!(form.set_field(ListingField::Location, "Soweto"));
        form.open();
        assert_eq!(form.fields().map(|f| f.location.as_str()), Some("Soweto"));

        form.cancel();
        assert!(!form.is_open());
        form.open();
        assert_eq!(form.fields(), Some(&ListingForm::default()));
    }

    #[rstest]
    #[tokio::test]
    async fn successful_submit_closes_the_form(auth: AuthMode) {
        let mut command = MockListingsCommand::new();
        command
            .expect_create()
            .times(1)
            .returning(|_, fields| Ok(created(fields)));

        let mut form = CreateListingForm::default();
        form.open();
        complete(&mut form);

        let listing = form.submit(&command, &auth).await.expect("submit succeeds");
        assert_eq!(listing.total_price(), 25.0);
        assert_eq!(form, CreateListingForm::Closed);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_fields_are_rejected_locally(auth: AuthMode) {
        let mut command = MockListingsCommand::new();
        command.expect_create().never();

        let mut form = CreateListingForm::default();
        form.open();
        complete(&mut form);
        form.set_field(ListingField::SellerName, "  ");

        let error = form.submit(&command, &auth).await.expect_err("missing field");
        assert_eq!(
            error,
            ListingError::Validation(ListingValidationError::Missing {
                field: ListingField::SellerName
            })
        );
        assert!(form.is_open());
        assert_eq!(form.error(), Some(&error));
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_keeps_values(auth: AuthMode) {
        let mut command = MockListingsCommand::new();
        command
            .expect_create()
            .times(1)
            .returning(|_, _| Err(ListingError::Create(ListingStoreError::connection("offline"))));

        let mut form = CreateListingForm::default();
        form.open();
        complete(&mut form);

        let error = form.submit(&command, &auth).await.expect_err("store fails");
        assert!(matches!(error, ListingError::Create(_)));
        assert_eq!(form.fields().map(|f| f.energy.as_str()), Some("10"));
        assert!(form.error().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn closed_form_has_nothing_to_submit(auth: AuthMode) {
        let mut command = MockListingsCommand::new();
        command.expect_create().never();

        let mut form = CreateListingForm::Closed;
        let error = form.submit(&command, &auth).await.expect_err("closed");
        assert!(matches!(error, ListingError::Validation(_)));
        assert_eq!(form, CreateListingForm::Closed);
    }
}
