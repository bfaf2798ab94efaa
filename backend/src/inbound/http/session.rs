//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session stores the caller's access token together with the
//! attributes the identity service reported when the token was presented.
//! Handlers read the resulting [`SessionState`] or the [`AuthMode`] for store
//! calls without touching Actix session keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessToken, AuthMode, Error, SessionState, UserAttributes};

pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";
pub(crate) const ATTRIBUTES_KEY: &str = "user_attributes";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record a successful sign-in.
    pub fn persist_sign_in(
        &self,
        token: &AccessToken,
        attributes: &UserAttributes,
    ) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACCESS_TOKEN_KEY, token.expose())
            .and_then(|()| self.0.insert(ATTRIBUTES_KEY, attributes))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the signed-in user.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    fn credentials(&self) -> Result<Option<(AccessToken, UserAttributes)>, Error> {
        let token = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .and_then(AccessToken::new);
        let attributes = match self.0.get::<UserAttributes>(ATTRIBUTES_KEY) {
            Ok(attributes) => attributes,
            Err(error) => {
                tracing::warn!(%error, "unreadable user attributes in session cookie");
                None
            }
        };
        Ok(token.zip(attributes))
    }

    /// Current identity state.
    pub fn state(&self) -> Result<SessionState, Error> {
        Ok(match self.credentials()? {
            Some((_, attributes)) => SessionState::SignedIn { attributes },
            None => SessionState::SignedOut,
        })
    }

    /// Store authorization for the signed-in caller, if any.
    pub fn auth_mode(&self) -> Result<Option<AuthMode>, Error> {
        Ok(self
            .credentials()?
            .map(|(token, attributes)| AuthMode::user_pool(attributes, token)))
    }

    /// Require a signed-in caller or return `401 Unauthorized`.
    pub fn require_auth(&self) -> Result<AuthMode, Error> {
        self.auth_mode()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
