//! Listings API handlers.
//!
//! ```text
//! GET /api/v1/listings?page=2
//! POST /api/v1/listings {"sellerId":"s-1","sellerName":"Thandi","energy":"10",
//!                        "pricePerKwh":"2.5","location":"Soweto"}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pagination::Page;
use serde::Deserialize;

use crate::domain::{Error, Listing, ListingForm, MarketplaceView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ListingFormSchema, ListingPageSchema, ListingSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string accepted by paged views.
///
/// `page` stays textual so malformed values fall back to the first page
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number; out-of-range values are clamped.
    #[param(value_type = Option<u32>, example = 2)]
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page, defaulting to the first when absent or unparsable.
    pub fn requested(&self) -> usize {
        requested_page(self.page.as_deref())
    }
}

pub(crate) fn requested_page(raw: Option<&str>) -> usize {
    raw.and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(1)
}

/// Fetch one page of listings.
///
/// The whole collection is fetched from the store and paged in memory.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of listings", body = ListingPageSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Store refused the caller", body = ErrorSchema),
        (status = 503, description = "Listing store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "listListings"
)]
#[get("/listings")]
pub async fn list_listings(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<Listing>>> {
    let auth = session.require_auth()?;
    let mut view = MarketplaceView::new();
    view.refresh(state.listings.as_ref(), &auth).await?;
    view.go_to(query.requested());
    Ok(web::Json(view.current_page().with_links(&req.full_url())))
}

/// Create a listing from raw form values.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = ListingFormSchema,
    responses(
        (status = 201, description = "Listing created", body = ListingSchema),
        (status = 400, description = "Missing or non-numeric field", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Store refused the caller", body = ErrorSchema),
        (status = 503, description = "Listing store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListingForm>,
) -> ApiResult<HttpResponse> {
    let auth = session.require_auth()?;
    let listing = state
        .listing_commands
        .create(&auth, &payload)
        .await
        .map_err(Error::from)?;
    Ok(HttpResponse::Created().json(listing))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{ListingStoreError, MockListingsCommand};
    use crate::domain::{ListingError, ListingField, ListingValidationError};
    use crate::inbound::http::auth::create_session;
    use crate::inbound::http::error::json_config;
    use crate::inbound::http::test_utils::{memory_state, sign_in, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .app_data(json_config())
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(create_session)
                    .service(list_listings)
                    .service(create_listing),
            )
    }

    fn form_json(energy: &str) -> Value {
        json!({
            "sellerId": "seller-1",
            "sellerName": "Thandi",
            "energy": energy,
            "pricePerKwh": "2.5",
            "location": "Soweto",
        })
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some("3"), 3)]
    #[case(Some(" 2 "), 2)]
    #[case(Some("abc"), 1)]
    #[case(Some("-4"), 1)]
    fn page_query_falls_back_to_the_first_page(#[case] raw: Option<&str>, #[case] expected: usize) {
        let query = PageQuery {
            page: raw.map(str::to_owned),
        };
        assert_eq!(query.requested(), expected);
    }

    #[actix_web::test]
    async fn listings_require_a_session() {
        let (state, _) = memory_state(3);
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/listings").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case("/api/v1/listings", 1, 10, false, true)]
    #[case("/api/v1/listings?page=3", 3, 5, true, false)]
    #[case("/api/v1/listings?page=0", 1, 10, false, true)]
    #[case("/api/v1/listings?page=99", 3, 5, true, false)]
    #[case("/api/v1/listings?page=two", 1, 10, false, true)]
    #[actix_web::test]
    async fn pages_are_clamped(
        #[case] uri: &str,
        #[case] page: u64,
        #[case] items: usize,
        #[case] has_previous: bool,
        #[case] has_next: bool,
    ) {
        let (state, _) = memory_state(25);
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = sign_in(&app).await;

        let body: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(body["page"], page);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["totalItems"], 25);
        assert_eq!(body["items"].as_array().map(Vec::len), Some(items));
        assert_eq!(body["hasPrevious"], has_previous);
        assert_eq!(body["hasNext"], has_next);
        assert!(body["links"]["self"].is_string());
    }

    #[actix_web::test]
    async fn create_derives_the_total_price() {
        let (state, store) = memory_state(0);
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = sign_in(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/listings")
                .cookie(cookie)
                .set_json(form_json("10"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["totalPrice"], 25.0);
        assert_eq!(body["createdAt"], "2025-03-14T09:30:00Z");
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn non_numeric_energy_is_a_bad_request() {
        let (state, store) = memory_state(0);
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = sign_in(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/listings")
                .cookie(cookie)
                .set_json(form_json("lots"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], "energy");
        assert_eq!(body["details"]["code"], "not_a_number");
        assert!(store.is_empty());
    }

    #[rstest]
    #[case(json!({"energy": 10, "pricePerKwh": "2.5"}).to_string())]
    #[case("{\"sellerId\": ".to_owned())]
    #[actix_web::test]
    async fn unreadable_bodies_use_the_error_envelope(#[case] body: String) {
        let (state, store) = memory_state(0);
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = sign_in(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/listings")
                .cookie(cookie)
                .insert_header((actix_web::http::header::CONTENT_TYPE, "application/json"))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert!(body["details"]["reason"].is_string());
        assert!(store.is_empty());
    }

    #[rstest]
    #[case(
        ListingError::Create(ListingStoreError::timeout("deadline elapsed")),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case(
        ListingError::Create(ListingStoreError::unauthorized("not the owner")),
        StatusCode::FORBIDDEN
    )]
    #[case(
        ListingError::Validation(ListingValidationError::Missing { field: ListingField::Location }),
        StatusCode::BAD_REQUEST
    )]
    #[actix_web::test]
    async fn create_failures_map_to_statuses(
        #[case] failure: ListingError,
        #[case] status: StatusCode,
    ) {
        let (state, _) = memory_state(0);
        let mut command = MockListingsCommand::new();
        command
            .expect_create()
            .times(1)
            .return_once(move |_, _| Err(failure));
        let mut state = state.get_ref().clone();
        state.listing_commands = Arc::new(command);
        let app = actix_test::init_service(test_app(web::Data::new(state))).await;
        let cookie = sign_in(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/listings")
                .cookie(cookie)
                .set_json(form_json("10"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), status);
    }
}
