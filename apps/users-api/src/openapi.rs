//! OpenAPI documentation configuration

use axum_helpers::HealthResponse;
use utoipa::OpenApi;

/// Combined OpenAPI documentation, rooted at `/api/v1`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for managing user accounts",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080/api/v1", description = "Local development server")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    ),
    components(schemas(HealthResponse)),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
