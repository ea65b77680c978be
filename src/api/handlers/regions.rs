//! Region and nation handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::REGION_TAG;
use crate::api::dto::{
    CreateNationRequest, CreateRegionRequest, DetailsQuery, ErrorResponse, PagedResponse,
    PaginationParams, UpdateNationRequest, UpdateRegionRequest,
};
use crate::error::AppResult;
use crate::models::{Nation, Region, RegionDetail};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Routes under `/api/regions`.
pub fn region_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_regions))
        .routes(routes!(create_region))
        .routes(routes!(get_region))
        .routes(routes!(update_region))
        .routes(routes!(delete_region))
        .routes(routes!(get_region_details))
}

/// Routes under `/api/nations`.
pub fn nation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_nations))
        .routes(routes!(create_nation))
        .routes(routes!(get_nation))
        .routes(routes!(update_nation))
        .routes(routes!(delete_nation))
}

// ============================================================================
// Regions
// ============================================================================

#[utoipa::path(
    get,
    path = "/",
    tag = REGION_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of regions", body = PagedResponse<Region>)
    )
)]
async fn list_regions(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<Region>>> {
    let (regions, total) = state
        .services
        .regions
        .list_regions(params.offset(), params.limit())
        .await?;
    Ok(Json(PagedResponse::new(regions, &params, total as u64)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = REGION_TAG,
    request_body = CreateRegionRequest,
    responses(
        (status = 201, description = "Region created", body = Region),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_region(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRegionRequest>,
) -> AppResult<(StatusCode, Json<Region>)> {
    let region = state
        .services
        .regions
        .create_region(payload.into_new_region())
        .await?;
    Ok((StatusCode::CREATED, Json(region)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Region ID")),
    responses(
        (status = 200, description = "Region found", body = Region),
        (status = 404, description = "Region not found", body = ErrorResponse)
    )
)]
async fn get_region(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Region>> {
    Ok(Json(state.services.regions.get_region(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Region ID")),
    request_body = UpdateRegionRequest,
    responses(
        (status = 200, description = "Region updated", body = Region),
        (status = 404, description = "Region not found", body = ErrorResponse)
    )
)]
async fn update_region(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateRegionRequest>,
) -> AppResult<Json<Region>> {
    let region = state
        .services
        .regions
        .update_region(id, payload.into_update_region())
        .await?;
    Ok(Json(region))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Region ID")),
    responses(
        (status = 204, description = "Region deleted"),
        (status = 404, description = "Region not found", body = ErrorResponse),
        (status = 400, description = "Region still has nations", body = ErrorResponse)
    )
)]
async fn delete_region(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.regions.delete_region(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Region with its nations
#[utoipa::path(
    get,
    path = "/{id}/details",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Region ID"), DetailsQuery),
    responses(
        (status = 200, description = "Region detail", body = RegionDetail),
        (status = 400, description = "Unknown include or one the resource does not have", body = ErrorResponse),
        (status = 404, description = "Region not found", body = ErrorResponse)
    )
)]
async fn get_region_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedQuery(query): ValidatedQuery<DetailsQuery>,
) -> AppResult<Json<RegionDetail>> {
    let include = query.include_spec()?;
    let detail = state
        .services
        .regions
        .get_region_details(id, include.as_ref())
        .await?;
    Ok(Json(detail))
}

// ============================================================================
// Nations
// ============================================================================

#[utoipa::path(
    get,
    path = "/",
    tag = REGION_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of nations", body = PagedResponse<Nation>)
    )
)]
async fn list_nations(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<Nation>>> {
    let (nations, total) = state
        .services
        .regions
        .list_nations(params.offset(), params.limit())
        .await?;
    Ok(Json(PagedResponse::new(nations, &params, total as u64)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = REGION_TAG,
    request_body = CreateNationRequest,
    responses(
        (status = 201, description = "Nation created", body = Nation),
        (status = 400, description = "Unknown region", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_nation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNationRequest>,
) -> AppResult<(StatusCode, Json<Nation>)> {
    let nation = state
        .services
        .regions
        .create_nation(payload.into_new_nation())
        .await?;
    Ok((StatusCode::CREATED, Json(nation)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Nation ID")),
    responses(
        (status = 200, description = "Nation found", body = Nation),
        (status = 404, description = "Nation not found", body = ErrorResponse)
    )
)]
async fn get_nation(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Nation>> {
    Ok(Json(state.services.regions.get_nation(id).await?))
}

/// Update a nation
///
/// Moving a nation refreshes both the old and new region details.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Nation ID")),
    request_body = UpdateNationRequest,
    responses(
        (status = 200, description = "Nation updated", body = Nation),
        (status = 404, description = "Nation not found", body = ErrorResponse)
    )
)]
async fn update_nation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateNationRequest>,
) -> AppResult<Json<Nation>> {
    let nation = state
        .services
        .regions
        .update_nation(id, payload.into_update_nation())
        .await?;
    Ok(Json(nation))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = REGION_TAG,
    params(("id" = i32, Path, description = "Nation ID")),
    responses(
        (status = 204, description = "Nation deleted"),
        (status = 404, description = "Nation not found", body = ErrorResponse)
    )
)]
async fn delete_nation(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.regions.delete_nation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
