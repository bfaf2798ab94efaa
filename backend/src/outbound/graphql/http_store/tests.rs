//! Regression coverage for the mapping helpers and the paging loop, the
//! latter against a loopback GraphQL stub.

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::{AccessToken, UserAttributes};

/// Canned `listListings` pages served in order, plus what each call sent.
#[derive(Default)]
struct StubGraphQl {
    pages: Mutex<VecDeque<Value>>,
    seen: Mutex<Vec<SeenRequest>>,
}

#[derive(Clone, Debug)]
struct SeenRequest {
    authorization: Option<String>,
    api_key: Option<String>,
    variables: Value,
}

impl StubGraphQl {
    fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("seen lock").clone()
    }
}

async fn graphql(
    stub: web::Data<StubGraphQl>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    stub.seen.lock().expect("seen lock").push(SeenRequest {
        authorization: header("authorization"),
        api_key: header(API_KEY_HEADER),
        variables: body["variables"].clone(),
    });
    let page = stub
        .pages
        .lock()
        .expect("pages lock")
        .pop_front()
        .unwrap_or_else(|| page(Vec::new(), None));
    HttpResponse::Ok().json(page)
}

async fn spawn_stub(
    pages: Vec<Value>,
    api_key: Option<&str>,
) -> (GraphQlListingStore, web::Data<StubGraphQl>, ServerHandle) {
    let stub = web::Data::new(StubGraphQl {
        pages: Mutex::new(pages.into()),
        seen: Mutex::default(),
    });
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");
    let data = stub.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/graphql", web::post().to(graphql))
    })
    .workers(1)
    .disable_signals()
    .listen(listener)
    .expect("listen on stub socket")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let endpoint = Url::parse(&format!("http://{addr}/graphql")).expect("stub endpoint");
    let store = GraphQlListingStore::new(
        endpoint,
        Duration::from_secs(5),
        api_key.map(str::to_owned),
    )
    .expect("reqwest client");
    (store, stub, handle)
}

fn record(id: &str, energy: f64) -> Value {
    json!({
        "id": id,
        "sellerId": "seller-1",
        "sellerName": "Thandi",
        "energy": energy,
        "pricePerKwh": 2.5,
        "totalPrice": energy * 2.5,
        "location": "Soweto",
        "createdAt": "2025-03-14T09:30:00.000Z"
    })
}

fn page(items: Vec<Value>, next_token: Option<&str>) -> Value {
    json!({ "data": { "listListings": { "items": items, "nextToken": next_token } } })
}

fn editor() -> AuthMode {
    AuthMode::user_pool(
        UserAttributes::new("owner-1"),
        AccessToken::new("editor-token").expect("token"),
    )
}

fn ids(listings: &[Listing]) -> Vec<String> {
    listings
        .iter()
        .map(|listing| listing.id().as_ref().to_owned())
        .collect()
}

#[actix_web::test]
async fn stored_records_that_fail_validation_are_skipped() {
    let (store, _stub, handle) = spawn_stub(
        vec![page(vec![record("a1", 10.0), record("a2", 0.0)], None)],
        None,
    )
    .await;

    let listings = store.list(&editor()).await.expect("list succeeds");
    assert_eq!(ids(&listings), vec!["a1"]);
    handle.stop(true).await;
}

#[actix_web::test]
async fn next_token_is_followed_until_it_runs_out() {
    let (store, stub, handle) = spawn_stub(
        vec![
            page(vec![record("a1", 10.0)], Some("t2")),
            page(vec![record("a2", 4.0)], None),
        ],
        None,
    )
    .await;

    let listings = store.list(&editor()).await.expect("list succeeds");
    assert_eq!(ids(&listings), vec!["a1", "a2"]);
    let seen = stub.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].variables["nextToken"], Value::Null);
    assert_eq!(seen[1].variables["nextToken"], "t2");
    assert_eq!(seen[1].variables["limit"], LIST_PAGE_LIMIT);
    handle.stop(true).await;
}

#[actix_web::test]
async fn a_repeated_token_stops_paging() {
    let (store, stub, handle) = spawn_stub(
        vec![
            page(vec![record("a1", 10.0)], Some("t2")),
            page(vec![record("a2", 4.0)], Some("t2")),
            page(vec![record("a3", 6.0)], None),
        ],
        None,
    )
    .await;

    let listings = store.list(&editor()).await.expect("list succeeds");
    assert_eq!(ids(&listings), vec!["a1", "a2"]);
    assert_eq!(stub.seen().len(), 2);
    handle.stop(true).await;
}

#[actix_web::test]
async fn user_pool_calls_carry_the_access_token() {
    let (store, stub, handle) = spawn_stub(vec![page(Vec::new(), None)], Some("stub-key")).await;

    store.list(&editor()).await.expect("list succeeds");
    let seen = stub.seen();
    assert_eq!(seen[0].authorization.as_deref(), Some("editor-token"));
    assert_eq!(seen[0].api_key, None);
    handle.stop(true).await;
}

#[actix_web::test]
async fn api_key_calls_carry_the_configured_key() {
    let (store, stub, handle) = spawn_stub(vec![page(Vec::new(), None)], Some("stub-key")).await;

    store.list(&AuthMode::ApiKey).await.expect("list succeeds");
    let seen = stub.seen();
    assert_eq!(seen[0].api_key.as_deref(), Some("stub-key"));
    assert_eq!(seen[0].authorization, None);
    handle.stop(true).await;
}

#[actix_web::test]
async fn api_key_mode_without_a_key_never_calls_out() {
    let (store, stub, handle) = spawn_stub(vec![page(Vec::new(), None)], None).await;

    let error = store
        .list(&AuthMode::ApiKey)
        .await
        .expect_err("no key configured");
    assert!(matches!(error, ListingStoreError::Unauthorized { .. }));
    assert!(stub.seen().is_empty());
    handle.stop(true).await;
}

#[rstest]
#[case::unauthorized(StatusCode::UNAUTHORIZED, "Unauthorized")]
#[case::forbidden(StatusCode::FORBIDDEN, "Unauthorized")]
#[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
#[case::bad_request(StatusCode::BAD_REQUEST, "Rejected")]
#[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Connection")]
fn maps_http_statuses(#[case] status: StatusCode, #[case] expected: &str) {
    let error = map_status_error(status, b"{\"message\":\"nope\"}");
    let matched = match expected {
        "Unauthorized" => matches!(error, ListingStoreError::Unauthorized { .. }),
        "Timeout" => matches!(error, ListingStoreError::Timeout { .. }),
        "Rejected" => matches!(error, ListingStoreError::Rejected { .. }),
        "Connection" => matches!(error, ListingStoreError::Connection { .. }),
        _ => panic!("unsupported test expectation: {expected}"),
    };
    assert!(matched, "{status} mapped to {error:?}");
}

#[test]
fn graphql_errors_win_over_partial_data() {
    let body = br#"{
        "data": { "listListings": null },
        "errors": [
            { "message": "Not Authorized to access listListings", "errorType": "Unauthorized" }
        ]
    }"#;
    let error = parse_response::<ListListingsData>(body).expect_err("errors present");
    assert!(matches!(error, ListingStoreError::Unauthorized { .. }));
}

#[test]
fn other_graphql_errors_are_rejections() {
    let body = br#"{
        "data": null,
        "errors": [
            { "message": "Variable 'energy' has an invalid value", "errorType": "BadRequest" },
            { "message": "second" }
        ]
    }"#;
    let error = parse_response::<CreateListingData>(body).expect_err("errors present");
    assert_eq!(
        error,
        ListingStoreError::rejected("Variable 'energy' has an invalid value; second")
    );
}

#[test]
fn decodes_a_listing_page() {
    let body = br#"{
        "data": {
            "listListings": {
                "items": [
                    {
                        "id": "a1",
                        "sellerId": "seller-1",
                        "sellerName": "Thandi",
                        "energy": 10,
                        "pricePerKwh": 2.5,
                        "totalPrice": 25.0,
                        "location": "Soweto",
                        "createdAt": "2025-03-14T09:30:00.000Z"
                    },
                    null
                ],
                "nextToken": "t2"
            }
        }
    }"#;
    let data = parse_response::<ListListingsData>(body).expect("payload decodes");
    let connection = data.list_listings.expect("connection");
    assert_eq!(connection.next_token.as_deref(), Some("t2"));
    assert_eq!(connection.items.into_iter().flatten().count(), 1);
}

#[test]
fn malformed_json_is_a_decode_error() {
    let error = parse_response::<ListListingsData>(b"<html>").expect_err("not json");
    assert!(matches!(error, ListingStoreError::Decode { .. }));
}

#[test]
fn long_bodies_are_truncated_in_messages() {
    let body = "x".repeat(500);
    let error = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
    assert!(error.to_string().ends_with("..."));
}
