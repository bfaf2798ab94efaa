//! Identity facts exposed to the rest of the domain.
//!
//! Authentication is delegated to an external identity service. The domain
//! only ever sees the outcome: a [`SessionState`] that is either signed in
//! with the caller's [`UserAttributes`] or signed out. Store calls take an
//! explicit [`AuthMode`] derived from that state.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Group whose members may read listings.
pub const EDITORS_GROUP: &str = "EDITORS";

/// Bearer token issued by the identity service.
///
/// The token is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token, rejecting blank input.
    ///
    /// # Examples
    /// ```
    /// use powerhub::domain::AccessToken;
    ///
    /// assert!(AccessToken::new("   ").is_none());
    /// let token = AccessToken::new(" abc ").expect("token");
    /// assert_eq!(token.expose(), "abc");
    /// assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Raw token for adapters that must forward it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Attributes the identity service reports for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAttributes {
    /// Stable subject identifier.
    pub subject: String,
    /// Email address, when shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Group memberships.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl UserAttributes {
    /// Attributes with only a subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            name: None,
            groups: Vec::new(),
        }
    }

    /// Add a group membership.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Whether the user belongs to `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|candidate| candidate == group)
    }

    /// Name shown in the navigation bar.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.subject)
    }
}

/// Whether a user is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SessionState {
    /// A user is signed in.
    SignedIn {
        /// Attributes reported by the identity service.
        attributes: UserAttributes,
    },
    /// Nobody is signed in.
    SignedOut,
}

impl SessionState {
    /// Attributes of the signed-in user, if any.
    pub fn attributes(&self) -> Option<&UserAttributes> {
        match self {
            Self::SignedIn { attributes } => Some(attributes),
            Self::SignedOut => None,
        }
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }
}

/// Credentials of a signed-in caller, forwarded to the listing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPoolCredentials {
    attributes: UserAttributes,
    token: AccessToken,
}

impl UserPoolCredentials {
    /// Bundle attributes with the token that proved them.
    pub fn new(attributes: UserAttributes, token: AccessToken) -> Self {
        Self { attributes, token }
    }

    /// Caller attributes.
    pub fn attributes(&self) -> &UserAttributes {
        &self.attributes
    }

    /// Caller subject, used as the record owner.
    pub fn subject(&self) -> &str {
        &self.attributes.subject
    }

    /// Bearer token.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }
}

/// Authorization mode a store call runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Signed-in user credentials.
    UserPool(UserPoolCredentials),
    /// The adapter's configured API key.
    ApiKey,
}

impl AuthMode {
    /// User-pool mode for a signed-in caller.
    pub fn user_pool(attributes: UserAttributes, token: AccessToken) -> Self {
        Self::UserPool(UserPoolCredentials::new(attributes, token))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UserPool(_) => "userPool",
            Self::ApiKey => "apiKey",
        }
    }
}
