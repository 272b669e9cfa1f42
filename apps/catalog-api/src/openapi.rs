//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Paginated, searchable item catalog backed by a JSON file",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    nest(
        (path = "/api/items", api = domain_catalog::ApiDoc),
        (path = "/api/stats", api = domain_catalog::StatsApiDoc)
    ),
    tags(
        (name = "Items", description = "Catalog item browsing endpoints"),
        (name = "Stats", description = "Aggregate catalog statistics")
    )
)]
pub struct ApiDoc;
