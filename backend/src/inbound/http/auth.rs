//! Session API handlers.
//!
//! ```text
//! POST /api/v1/session {"accessToken":"eyJ..."}
//! GET /api/v1/session
//! DELETE /api/v1/session
//! ```
//!
//! Signing in resolves the caller's attributes once through the identity
//! provider and keeps them in the cookie session next to the token.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{IdentityError, IdentityProvider};
use crate::domain::{AccessToken, Error, SessionState, UserAttributes};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SessionStateSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in request body for `POST /api/v1/session`.
///
/// Example JSON:
/// `{"accessToken":"eyJraWQiOi..."}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub access_token: String,
}

/// Resolve `raw_token` and record the sign-in.
///
/// Any identity failure signs the caller out and reports `401`.
pub(crate) async fn sign_in(
    identity: &dyn IdentityProvider,
    session: &SessionContext,
    raw_token: &str,
) -> ApiResult<UserAttributes> {
    let token = AccessToken::new(raw_token).ok_or_else(|| {
        Error::invalid_request("access token must not be empty")
            .with_details(json!({ "field": "accessToken", "code": "empty_access_token" }))
    })?;

    match identity.fetch_user_attributes(&token).await {
        Ok(attributes) => {
            session.persist_sign_in(&token, &attributes)?;
            info!(subject = %attributes.subject, "signed in");
            Ok(attributes)
        }
        Err(error) => {
            log_identity_failure(&error);
            session.sign_out();
            Err(Error::unauthorized("sign-in failed"))
        }
    }
}

fn log_identity_failure(error: &IdentityError) {
    match error {
        IdentityError::Transport { .. } => {
            warn!(%error, "identity service unavailable; treating caller as signed out");
        }
        IdentityError::Rejected { .. } | IdentityError::Decode { .. } => {
            warn!(%error, "access token not accepted; treating caller as signed out");
        }
    }
}

/// Exchange an access token for a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionStateSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Token not accepted", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["session"],
    operation_id = "signIn",
    security([])
)]
#[post("/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<SessionState>> {
    let attributes = sign_in(state.identity.as_ref(), &session, &payload.access_token).await?;
    Ok(web::Json(SessionState::SignedIn { attributes }))
}

/// Report whether the caller is signed in.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session state", body = SessionStateSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionState>> {
    Ok(web::Json(session.state()?))
}

/// Sign out.
#[utoipa::path(
    delete,
    path = "/api/v1/session",
    responses((status = 204, description = "Signed out")),
    tags = ["session"],
    operation_id = "signOut",
    security([])
)]
#[delete("/session")]
pub async fn delete_session(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}
