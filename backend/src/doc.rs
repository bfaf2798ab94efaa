//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the JSON API. It registers:
//!
//! - **Paths**: session, listings and health endpoints
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that describe
//!   domain types without coupling them to utoipa
//! - **Security**: session cookie authentication scheme
//!
//! HTML pages are not part of the document. The generated specification is
//! served by Swagger UI (debug builds) and printed by the `openapi-dump`
//! binary.

use crate::inbound::http::auth::SignInRequest;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ListingFormSchema, ListingPageSchema, ListingSchema,
    PageLinksSchema, SessionStateSchema, UserAttributesSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/session.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Power Hub API",
        description = "Energy listings for signed-in community members, plus health probes.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::create_session,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::delete_session,
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ListingSchema,
        ListingFormSchema,
        ListingPageSchema,
        PageLinksSchema,
        SessionStateSchema,
        UserAttributesSchema,
        SignInRequest,
    )),
    tags(
        (name = "session", description = "Sign in with an identity-service token"),
        (name = "listings", description = "Energy listings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered OpenAPI surface.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const LISTING_SCHEMA_NAME: &str = "crate.domain.Listing";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn listing_schema_has_derived_total() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let listing_schema = schemas.get(LISTING_SCHEMA_NAME).expect("Listing schema");

        assert_object_schema_has_field(listing_schema, "totalPrice");
        assert_object_schema_has_field(listing_schema, "createdAt");
    }

    #[test]
    fn json_endpoints_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/api/v1/session", "/api/v1/listings", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(!doc.paths.paths.contains_key("/marketplace"));
    }
}
