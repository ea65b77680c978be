//! Category and subcategory handlers.
//!
//! Categories live under `/api/categories`, with their subcategories listed
//! and created beneath `/{id}/subcategories`. Individual subcategories are
//! addressed directly under `/api/subcategories/{id}`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{
    ErrorResponse, NameRequest, PagedResponse, PaginationParams, UpdateSubcategoryRequest,
};
use crate::error::AppResult;
use crate::models::{Category, Subcategory};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories))
        .routes(routes!(create_category))
        .routes(routes!(get_category))
        .routes(routes!(rename_category))
        .routes(routes!(delete_category))
        .routes(routes!(list_subcategories))
        .routes(routes!(create_subcategory))
}

pub fn subcategory_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_subcategory))
        .routes(routes!(update_subcategory))
        .routes(routes!(delete_subcategory))
}

// ============================================================================
// Categories
// ============================================================================

#[utoipa::path(
    get,
    path = "/",
    tag = CATEGORY_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of categories", body = PagedResponse<Category>)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<Category>>> {
    let (categories, total) = state
        .services
        .categories
        .list_categories(params.offset(), params.limit())
        .await?;
    Ok(Json(PagedResponse::new(categories, &params, total as u64)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = CATEGORY_TAG,
    request_body = NameRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NameRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.categories.create_category(payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Category>> {
    Ok(Json(state.services.categories.get_category(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    request_body = NameRequest,
    responses(
        (status = 200, description = "Category renamed", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn rename_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NameRequest>,
) -> AppResult<Json<Category>> {
    let category = state
        .services
        .categories
        .rename_category(id, payload.name)
        .await?;
    Ok(Json(category))
}

/// Delete a category
///
/// Its subcategories and every recipe link to either are removed with it.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn delete_category(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/subcategories",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Subcategories ordered by name", body = Vec<Subcategory>),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn list_subcategories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Subcategory>>> {
    Ok(Json(state.services.categories.list_subcategories(id).await?))
}

#[utoipa::path(
    post,
    path = "/{id}/subcategories",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    request_body = NameRequest,
    responses(
        (status = 201, description = "Subcategory created", body = Subcategory),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Name already taken in this category", body = ErrorResponse)
    )
)]
async fn create_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NameRequest>,
) -> AppResult<(StatusCode, Json<Subcategory>)> {
    let subcategory = state
        .services
        .categories
        .create_subcategory(id, payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(subcategory)))
}

// ============================================================================
// Subcategories
// ============================================================================

#[utoipa::path(
    get,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory found", body = Subcategory),
        (status = 404, description = "Subcategory not found", body = ErrorResponse)
    )
)]
async fn get_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Subcategory>> {
    Ok(Json(state.services.categories.get_subcategory(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Subcategory ID")),
    request_body = UpdateSubcategoryRequest,
    responses(
        (status = 200, description = "Subcategory updated", body = Subcategory),
        (status = 404, description = "Subcategory not found", body = ErrorResponse)
    )
)]
async fn update_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateSubcategoryRequest>,
) -> AppResult<Json<Subcategory>> {
    let subcategory = state
        .services
        .categories
        .update_subcategory(id, payload.into_update_subcategory())
        .await?;
    Ok(Json(subcategory))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Subcategory ID")),
    responses(
        (status = 204, description = "Subcategory deleted"),
        (status = 404, description = "Subcategory not found", body = ErrorResponse)
    )
)]
async fn delete_subcategory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.categories.delete_subcategory(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
