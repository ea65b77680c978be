use utoipa::OpenApi;

pub const RECIPE_TAG: &str = "Recipes";
pub const INGREDIENT_TAG: &str = "Ingredients";
pub const CATEGORY_TAG: &str = "Categories";
pub const REGION_TAG: &str = "Regions";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Catalog",
        description = "Recipe catalog API with a read-through cache",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::cache::CacheStatus,
        )
    ),
    tags(
        (name = RECIPE_TAG, description = "Recipes and their child collections"),
        (name = INGREDIENT_TAG, description = "Ingredient endpoints"),
        (name = CATEGORY_TAG, description = "Category and subcategory endpoints"),
        (name = REGION_TAG, description = "Region and nation endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
