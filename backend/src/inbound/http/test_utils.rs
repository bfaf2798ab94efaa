//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use chrono::{TimeZone, Utc};
use mockable::MockClock;

use crate::domain::ports::FixtureIdentityProvider;
use crate::domain::{Listing, ListingForm, ListingId, ListingService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryListingStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// A listing numbered `n`, with whole-number energy so totals stay exact.
pub fn sample_listing(n: usize) -> Listing {
    let draft = ListingForm {
        seller_id: format!("seller-{n}"),
        seller_name: format!("Seller {n}"),
        energy: "10".into(),
        price_per_kwh: "2.5".into(),
        location: "Soweto".into(),
    }
    .validate(Utc::now())
    .expect("sample listing is valid");
    Listing::new(
        ListingId::new(format!("listing-{n}")).expect("listing id"),
        draft,
    )
}

/// HTTP state over an in-memory store holding `count` sample listings, a
/// fixed clock and the fixture identity provider.
pub fn memory_state(count: usize) -> (web::Data<HttpState>, Arc<InMemoryListingStore>) {
    let store = Arc::new(InMemoryListingStore::seeded(
        FixtureIdentityProvider::SUBJECT,
        (1..=count).map(sample_listing),
    ));
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid fixture timestamp"),
    );
    let service = ListingService::new(store.clone(), Arc::new(clock));
    let state = HttpState::from_service(Arc::new(service), Arc::new(FixtureIdentityProvider));
    (web::Data::new(state), store)
}

/// Sign in through `POST /api/v1/session` and return the session cookie.
pub async fn sign_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/session")
            .set_json(serde_json::json!({ "accessToken": "test-token" }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "sign-in failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
