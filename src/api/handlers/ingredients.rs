//! Ingredient handlers.
//!
//! Routes:
//! - GET /         - Paginated list
//! - POST /        - Create
//! - GET /{id}     - Get by ID
//! - PUT /{id}     - Update
//! - DELETE /{id}  - Delete

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::INGREDIENT_TAG;
use crate::api::dto::{
    CreateIngredientRequest, ErrorResponse, PagedResponse, PaginationParams,
    UpdateIngredientRequest,
};
use crate::error::AppResult;
use crate::models::Ingredient;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

pub fn ingredient_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_ingredients))
        .routes(routes!(create_ingredient))
        .routes(routes!(get_ingredient))
        .routes(routes!(update_ingredient))
        .routes(routes!(delete_ingredient))
}

#[utoipa::path(
    get,
    path = "/",
    tag = INGREDIENT_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of ingredients", body = PagedResponse<Ingredient>)
    )
)]
async fn list_ingredients(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<Ingredient>>> {
    let (ingredients, total) = state
        .services
        .ingredients
        .list_ingredients(params.offset(), params.limit())
        .await?;
    Ok(Json(PagedResponse::new(ingredients, &params, total as u64)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = INGREDIENT_TAG,
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = Ingredient),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn create_ingredient(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateIngredientRequest>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let ingredient = state
        .services
        .ingredients
        .create_ingredient(payload.into_new_ingredient())
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = INGREDIENT_TAG,
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient found", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Ingredient>> {
    Ok(Json(state.services.ingredients.get_ingredient(id).await?))
}

/// Update an ingredient
///
/// Renames show up in the detail view of every recipe using it.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = INGREDIENT_TAG,
    params(("id" = i32, Path, description = "Ingredient ID")),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateIngredientRequest>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = state
        .services
        .ingredients
        .update_ingredient(id, payload.into_update_ingredient())
        .await?;
    Ok(Json(ingredient))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = INGREDIENT_TAG,
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.ingredients.delete_ingredient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
