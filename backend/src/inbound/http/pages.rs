//! HTML page handlers.
//!
//! ```text
//! GET /
//! GET /login            POST /login {accessToken}     POST /logout
//! GET /marketplace?page=2&form=open
//! POST /marketplace/listings {sellerId, sellerName, energy, pricePerKwh, location}
//! ```
//!
//! The marketplace requires a signed-in session; signed-out visitors are
//! redirected to the sign-in page.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{AuthMode, CreateListingForm, ListingError, ListingForm, MarketplaceView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{SignInRequest, sign_in};
use crate::inbound::http::listings::requested_page;
use crate::inbound::http::render;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string of the marketplace page.
#[derive(Debug, Default, Deserialize)]
pub struct MarketplaceQuery {
    /// One-based page; malformed values fall back to the first page.
    pub page: Option<String>,
    /// `open` shows the add-listing modal.
    pub form: Option<String>,
}

impl MarketplaceQuery {
    fn wants_form(&self) -> bool {
        self.form.as_deref() == Some("open")
    }
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(body)
}

fn see_other(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Landing page.
#[get("/")]
pub async fn landing(session: SessionContext) -> ApiResult<HttpResponse> {
    Ok(html(StatusCode::OK, render::landing_page(&session.state()?)))
}

/// Sign-in form. Signed-in callers go straight to the marketplace.
#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.state()?.is_signed_in() {
        return Ok(see_other("/marketplace"));
    }
    Ok(html(StatusCode::OK, render::login_page(None)))
}

/// Sign in from the HTML form.
#[post("/login")]
pub async fn login_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignInRequest>,
) -> HttpResponse {
    match sign_in(state.identity.as_ref(), &session, &form.access_token).await {
        Ok(_) => see_other("/marketplace"),
        Err(error) => html(
            actix_web::ResponseError::status_code(&error),
            render::login_page(Some("Sign-in failed. Check your access token and try again.")),
        ),
    }
}

/// Sign out from the navigation bar.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    see_other("/")
}

/// Marketplace page.
#[get("/marketplace")]
pub async fn marketplace(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MarketplaceQuery>,
) -> ApiResult<HttpResponse> {
    let Some(auth) = session.auth_mode()? else {
        return Ok(see_other("/login"));
    };
    let mut view = MarketplaceView::new();
    // A failed fetch is logged by the view and renders as an empty table.
    let _ = view.refresh(state.listings.as_ref(), &auth).await;
    view.go_to(requested_page(query.page.as_deref()));
    if query.wants_form() {
        view.form_mut().open();
    }
    Ok(html(
        StatusCode::OK,
        render::marketplace_page(&view, &session.state()?),
    ))
}

fn failure_status(error: &ListingError) -> StatusCode {
    match error {
        ListingError::Validation(_) => StatusCode::BAD_REQUEST,
        ListingError::Create(_) | ListingError::Fetch(_) => StatusCode::BAD_GATEWAY,
    }
}

async fn submit(
    state: &HttpState,
    auth: &AuthMode,
    fields: ListingForm,
) -> (MarketplaceView, Result<(), ListingError>) {
    let mut view = MarketplaceView::new();
    *view.form_mut() = CreateListingForm::filled(fields);
    // Success redirects, and the redirected page fetches the listings itself.
    let outcome = view
        .form_mut()
        .submit(state.listing_commands.as_ref(), auth)
        .await
        .map(|_| ());
    if outcome.is_err() {
        let _ = view.refresh(state.listings.as_ref(), auth).await;
    }
    (view, outcome)
}

/// Add-listing form submission.
///
/// Success redirects to the first marketplace page. Failure re-renders the
/// page with the modal open, the typed values kept and the error shown.
#[post("/marketplace/listings")]
pub async fn submit_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ListingForm>,
) -> ApiResult<HttpResponse> {
    let Some(auth) = session.auth_mode()? else {
        return Ok(see_other("/login"));
    };
    let (view, outcome) = submit(&state, &auth, form.into_inner()).await;
    match outcome {
        Ok(()) => Ok(see_other("/marketplace")),
        Err(error) => Ok(html(
            failure_status(&error),
            render::marketplace_page(&view, &session.state()?),
        )),
    }
}
