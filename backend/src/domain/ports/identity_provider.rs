//! Driven port for the external identity service.

use async_trait::async_trait;

use crate::domain::{AccessToken, EDITORS_GROUP, UserAttributes};

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving user attributes.
    pub enum IdentityError {
        /// The identity service could not be reached.
        Transport { message: String } => "identity service unreachable: {message}",
        /// The token was refused.
        Rejected { message: String } => "identity service rejected token: {message}",
        /// The identity service answered with an unreadable payload.
        Decode { message: String } => "identity response invalid: {message}",
    }
}

/// Resolves the attributes of the user a token belongs to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch attributes for the bearer of `token`.
    async fn fetch_user_attributes(
        &self,
        token: &AccessToken,
    ) -> Result<UserAttributes, IdentityError>;
}

/// Development identity provider that signs in any non-blank token as a fixed
/// editor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    /// Subject reported for every token.
    pub const SUBJECT: &'static str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn fetch_user_attributes(
        &self,
        _token: &AccessToken,
    ) -> Result<UserAttributes, IdentityError> {
        Ok(UserAttributes {
            email: Some("thandi@powerhub.test".to_owned()),
            name: Some("Thandi Nkosi".to_owned()),
            ..UserAttributes::new(Self::SUBJECT).with_group(EDITORS_GROUP)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_provider_returns_an_editor() {
        let token = AccessToken::new("dev").expect("token");
        let attributes = FixtureIdentityProvider
            .fetch_user_attributes(&token)
            .await
            .expect("attributes");
        assert_eq!(attributes.subject, FixtureIdentityProvider::SUBJECT);
        assert!(attributes.in_group(EDITORS_GROUP));
        assert_eq!(attributes.display_name(), "Thandi Nkosi");
    }
}
