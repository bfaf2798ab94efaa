//! OIDC userinfo identity provider.
//!
//! Presents the caller's access token as a bearer credential to the
//! configured userinfo endpoint and maps the standard claims (`sub`,
//! `email`, `name`) plus the `cognito:groups` claim into
//! [`UserAttributes`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{IdentityError, IdentityProvider};
use crate::domain::{AccessToken, UserAttributes};

#[derive(Debug, Deserialize)]
struct UserInfoDto {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    #[serde(default, rename = "cognito:groups")]
    groups: Vec<String>,
}

impl UserInfoDto {
    fn into_domain(self) -> Result<UserAttributes, IdentityError> {
        if self.sub.trim().is_empty() {
            return Err(IdentityError::decode("userinfo subject is blank"));
        }
        Ok(UserAttributes {
            subject: self.sub,
            email: self.email,
            name: self.name,
            groups: self.groups,
        })
    }
}

/// Identity provider backed by an OIDC userinfo endpoint.
pub struct UserInfoIdentityProvider {
    client: Client,
    endpoint: Url,
}

impl UserInfoIdentityProvider {
    /// Build a provider with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IdentityProvider for UserInfoIdentityProvider {
    async fn fetch_user_attributes(
        &self,
        token: &AccessToken,
    ) -> Result<UserAttributes, IdentityError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(token.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| IdentityError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| IdentityError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        parse_attributes(body.as_ref())
    }
}

fn map_status_error(status: StatusCode) -> IdentityError {
    let message = format!("status {}", status.as_u16());
    if status.is_client_error() {
        IdentityError::rejected(message)
    } else {
        IdentityError::transport(message)
    }
}

fn parse_attributes(body: &[u8]) -> Result<UserAttributes, IdentityError> {
    let decoded: UserInfoDto = serde_json::from_slice(body)
        .map_err(|err| IdentityError::decode(format!("invalid userinfo payload: {err}")))?;
    decoded.into_domain()
}
