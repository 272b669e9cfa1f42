use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::ValidatedJson;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateItem, Item, ItemPage, ItemQuery, StatsSnapshot};
use crate::service::CatalogService;
use crate::store::ItemStore;

/// OpenAPI documentation for the items endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item),
    components(schemas(Item, CreateItem, ItemPage)),
    tags(
        (name = "Items", description = "Catalog item browsing endpoints")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the stats endpoint
#[derive(OpenApi)]
#[openapi(
    paths(get_stats),
    components(schemas(StatsSnapshot)),
    tags(
        (name = "Stats", description = "Aggregate catalog statistics")
    )
)]
pub struct StatsApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<S: ItemStore + 'static>(service: CatalogService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item))
        .with_state(shared_service)
}

/// Create the stats router
pub fn stats_router<S: ItemStore + 'static>(service: CatalogService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_stats))
        .with_state(shared_service)
}

/// List items with optional search and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(ItemQuery),
    responses(
        (status = 200, description = "One page of matching items", body = ItemPage),
        (status = 500, description = "Item store could not be read")
    )
)]
async fn list_items<S: ItemStore>(
    State(service): State<Arc<CatalogService<S>>>,
    Query(params): Query<ItemQuery>,
) -> CatalogResult<Json<ItemPage>> {
    let page = service.list_items(params).await?;
    Ok(Json(page))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, description = "Missing or invalid name/price"),
        (status = 500, description = "Item store could not be written")
    )
)]
async fn create_item<S: ItemStore>(
    State(service): State<Arc<CatalogService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> CatalogResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "No item with this id"),
        (status = 500, description = "Item store could not be read")
    )
)]
async fn get_item<S: ItemStore>(
    State(service): State<Arc<CatalogService<S>>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<Item>> {
    // A non-numeric id can never match a stored item, so it is a plain 404
    let id: i64 = id.parse().map_err(|_| CatalogError::NotFound(-1))?;
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Aggregate statistics over the full catalog
#[utoipa::path(
    get,
    path = "",
    tag = "Stats",
    responses(
        (status = 200, description = "Cached statistics snapshot", body = StatsSnapshot),
        (status = 500, description = "No snapshot could be computed")
    )
)]
async fn get_stats<S: ItemStore>(
    State(service): State<Arc<CatalogService<S>>>,
) -> CatalogResult<Json<StatsSnapshot>> {
    let snapshot = service.stats().await?;
    Ok(Json((*snapshot).clone()))
}
