//! Recipe request handlers.
//!
//! Routes (under `/api/recipes`):
//! - GET    /                                  - Paginated list
//! - POST   /                                  - Create
//! - GET    /{id}                              - Flat recipe
//! - PUT    /{id}                              - Partial update
//! - DELETE /{id}                              - Delete with all child rows
//! - GET    /{id}/details                      - Denormalized view
//! - PUT    /{id}/instructions                 - Replace instructions
//! - PUT    /{id}/aliases                      - Replace aliases
//! - PUT    /{id}/categories                   - Replace category links
//! - PUT    /{id}/subcategories                - Replace subcategory links
//! - GET    /{id}/images                       - List images
//! - POST   /{id}/images                       - Add image
//! - DELETE /{id}/images/{image_id}            - Remove image
//! - GET    /{id}/ingredients                  - List ingredient links
//! - POST   /{id}/ingredients                  - Link ingredient
//! - PUT    /{id}/ingredients/{ingredient_id}  - Update quantity/unit
//! - DELETE /{id}/ingredients/{ingredient_id}  - Unlink ingredient

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::RECIPE_TAG;
use crate::api::dto::{
    AddIngredientRequest, CreateImageRequest, CreateRecipeRequest, DetailsQuery, ErrorResponse,
    PagedResponse, PaginationParams, ReplaceAliasesRequest, ReplaceInstructionsRequest,
    ReplaceLinksRequest, UpdateRecipeIngredientRequest, UpdateRecipeRequest,
};
use crate::error::AppResult;
use crate::models::{
    Alias, Category, Instruction, Recipe, RecipeDetail, RecipeImage, RecipeIngredient,
    Subcategory,
};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

pub fn recipe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_recipes))
        .routes(routes!(create_recipe))
        .routes(routes!(get_recipe))
        .routes(routes!(update_recipe))
        .routes(routes!(delete_recipe))
        .routes(routes!(get_recipe_details))
        .routes(routes!(replace_instructions))
        .routes(routes!(replace_aliases))
        .routes(routes!(replace_categories))
        .routes(routes!(replace_subcategories))
        .routes(routes!(list_images))
        .routes(routes!(add_image))
        .routes(routes!(delete_image))
        .routes(routes!(list_ingredients))
        .routes(routes!(add_ingredient))
        .routes(routes!(update_ingredient))
        .routes(routes!(remove_ingredient))
}

// ============================================================================
// Recipe rows
// ============================================================================

/// List recipes
///
/// Every returned row is written to the cache.
#[utoipa::path(
    get,
    path = "/",
    tag = RECIPE_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated list of recipes", body = PagedResponse<Recipe>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse)
    )
)]
async fn list_recipes(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<Recipe>>> {
    let (recipes, total) = state
        .services
        .recipes
        .list_recipes(params.offset(), params.limit())
        .await?;
    Ok(Json(PagedResponse::new(recipes, &params, total as u64)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = RECIPE_TAG,
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn create_recipe(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    let recipe = state
        .services
        .recipes
        .create_recipe(payload.into_new_recipe())
        .await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn get_recipe(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Recipe>> {
    Ok(Json(state.services.recipes.get_recipe(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateRecipeRequest>,
) -> AppResult<Json<Recipe>> {
    let recipe = state
        .services
        .recipes
        .update_recipe(id, payload.into_update_recipe())
        .await?;
    Ok(Json(recipe))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn delete_recipe(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.recipes.delete_recipe(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recipe detail view
///
/// Without `include` the full view is served from the cache when present.
/// Any explicit projection is read from the database and never cached.
#[utoipa::path(
    get,
    path = "/{id}/details",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID"), DetailsQuery),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetail),
        (status = 400, description = "Unknown include or one the resource does not have", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn get_recipe_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedQuery(query): ValidatedQuery<DetailsQuery>,
) -> AppResult<Json<RecipeDetail>> {
    let include = query.include_spec()?;
    let detail = state
        .services
        .recipes
        .get_recipe_details(id, include.as_ref())
        .await?;
    Ok(Json(detail))
}

// ============================================================================
// Child collections
// ============================================================================

#[utoipa::path(
    put,
    path = "/{id}/instructions",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = ReplaceInstructionsRequest,
    responses(
        (status = 200, description = "Instructions ordered by step", body = Vec<Instruction>),
        (status = 400, description = "Invalid steps", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn replace_instructions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReplaceInstructionsRequest>,
) -> AppResult<Json<Vec<Instruction>>> {
    let instructions = state
        .services
        .recipes
        .replace_instructions(id, payload.into_steps())
        .await?;
    Ok(Json(instructions))
}

#[utoipa::path(
    put,
    path = "/{id}/aliases",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = ReplaceAliasesRequest,
    responses(
        (status = 200, description = "Aliases replaced", body = Vec<Alias>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn replace_aliases(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReplaceAliasesRequest>,
) -> AppResult<Json<Vec<Alias>>> {
    let aliases = state
        .services
        .recipes
        .replace_aliases(id, payload.aliases)
        .await?;
    Ok(Json(aliases))
}

#[utoipa::path(
    put,
    path = "/{id}/categories",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = ReplaceLinksRequest,
    responses(
        (status = 200, description = "Linked categories", body = Vec<Category>),
        (status = 400, description = "Unknown category", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn replace_categories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReplaceLinksRequest>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state
        .services
        .recipes
        .replace_categories(id, payload.ids)
        .await?;
    Ok(Json(categories))
}

#[utoipa::path(
    put,
    path = "/{id}/subcategories",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = ReplaceLinksRequest,
    responses(
        (status = 200, description = "Linked subcategories", body = Vec<Subcategory>),
        (status = 400, description = "Unknown subcategory", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn replace_subcategories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReplaceLinksRequest>,
) -> AppResult<Json<Vec<Subcategory>>> {
    let subcategories = state
        .services
        .recipes
        .replace_subcategories(id, payload.ids)
        .await?;
    Ok(Json(subcategories))
}

#[utoipa::path(
    get,
    path = "/{id}/images",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Images of the recipe", body = Vec<RecipeImage>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn list_images(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RecipeImage>>> {
    Ok(Json(state.services.recipes.list_images(id).await?))
}

#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = CreateImageRequest,
    responses(
        (status = 201, description = "Image added", body = RecipeImage),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn add_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateImageRequest>,
) -> AppResult<(StatusCode, Json<RecipeImage>)> {
    let image = state
        .services
        .recipes
        .add_image(id, payload.url, payload.caption)
        .await?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    delete,
    path = "/{id}/images/{image_id}",
    tag = RECIPE_TAG,
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("image_id" = i32, Path, description = "Image ID")
    ),
    responses(
        (status = 204, description = "Image removed"),
        (status = 404, description = "Image not found on this recipe", body = ErrorResponse)
    )
)]
async fn delete_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state.services.recipes.delete_image(id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/ingredients",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Ingredient links", body = Vec<RecipeIngredient>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
async fn list_ingredients(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RecipeIngredient>>> {
    Ok(Json(state.services.recipes.list_ingredients(id).await?))
}

#[utoipa::path(
    post,
    path = "/{id}/ingredients",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = AddIngredientRequest,
    responses(
        (status = 201, description = "Ingredient linked", body = RecipeIngredient),
        (status = 400, description = "Unknown ingredient", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Ingredient already linked", body = ErrorResponse)
    )
)]
async fn add_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AddIngredientRequest>,
) -> AppResult<(StatusCode, Json<RecipeIngredient>)> {
    let link = state
        .services
        .recipes
        .add_ingredient(id, payload.ingredient_id, payload.quantity, payload.unit)
        .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[utoipa::path(
    put,
    path = "/{id}/ingredients/{ingredient_id}",
    tag = RECIPE_TAG,
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("ingredient_id" = i32, Path, description = "Ingredient ID")
    ),
    request_body = UpdateRecipeIngredientRequest,
    responses(
        (status = 200, description = "Link updated", body = RecipeIngredient),
        (status = 404, description = "Ingredient not linked to this recipe", body = ErrorResponse)
    )
)]
async fn update_ingredient(
    State(state): State<AppState>,
    Path((id, ingredient_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<UpdateRecipeIngredientRequest>,
) -> AppResult<Json<RecipeIngredient>> {
    let link = state
        .services
        .recipes
        .update_ingredient(id, ingredient_id, payload.into_update())
        .await?;
    Ok(Json(link))
}

#[utoipa::path(
    delete,
    path = "/{id}/ingredients/{ingredient_id}",
    tag = RECIPE_TAG,
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("ingredient_id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient unlinked"),
        (status = 404, description = "Ingredient not linked to this recipe", body = ErrorResponse)
    )
)]
async fn remove_ingredient(
    State(state): State<AppState>,
    Path((id, ingredient_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .services
        .recipes
        .remove_ingredient(id, ingredient_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
