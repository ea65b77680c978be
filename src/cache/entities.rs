//! One typed cache per entity kind, shared process-wide.

use futures::future::join_all;
use tokio::sync::OnceCell;

use crate::cache::{CacheConnection, TypedCache};
use crate::config::CacheConfig;
use crate::models::{
    Category, Ingredient, Nation, Recipe, RecipeDetail, RecipeImage, RecipeIngredient, Region,
    RegionDetail, Subcategory,
};

/// Key prefixes, one per kind.
pub mod kinds {
    pub const RECIPE: &str = "recipe";
    pub const RECIPE_DETAIL: &str = "recipeDetail";
    pub const REGION: &str = "region";
    pub const REGION_DETAIL: &str = "regionDetail";
    pub const NATION: &str = "nation";
    pub const CATEGORY: &str = "category";
    pub const SUBCATEGORY: &str = "subcategory";
    pub const INGREDIENT: &str = "ingredient";
    pub const RECIPE_IMAGE: &str = "RecipeImage";
    pub const RECIPE_INGREDIENT: &str = "RecipeIngredient";
}

static ENTITY_CACHES: OnceCell<EntityCaches> = OnceCell::const_new();

/// Connects the configured backend and builds the process-wide caches.
///
/// Later calls return the first instance regardless of `config`.
pub async fn init_entity_caches(config: &CacheConfig) -> &'static EntityCaches {
    ENTITY_CACHES
        .get_or_init(|| async { EntityCaches::new(CacheConnection::connect(config).await) })
        .await
}

/// `None` until `init_entity_caches` has run.
pub fn entity_caches() -> Option<&'static EntityCaches> {
    ENTITY_CACHES.get()
}

/// All typed caches over one connection. Cloning shares the connection.
#[derive(Clone)]
pub struct EntityCaches {
    pub recipe: TypedCache<Recipe>,
    pub recipe_detail: TypedCache<RecipeDetail>,
    pub region: TypedCache<Region>,
    pub region_detail: TypedCache<RegionDetail>,
    pub nation: TypedCache<Nation>,
    pub category: TypedCache<Category>,
    pub subcategory: TypedCache<Subcategory>,
    pub ingredient: TypedCache<Ingredient>,
    pub image: TypedCache<RecipeImage>,
    pub recipe_ingredient: TypedCache<RecipeIngredient>,
    connection: CacheConnection,
}

impl EntityCaches {
    /// Side-effect free; tests build their own instances with this.
    pub fn new(connection: CacheConnection) -> Self {
        Self {
            recipe: TypedCache::new(kinds::RECIPE, connection.clone()),
            recipe_detail: TypedCache::new(kinds::RECIPE_DETAIL, connection.clone()),
            region: TypedCache::new(kinds::REGION, connection.clone()),
            region_detail: TypedCache::new(kinds::REGION_DETAIL, connection.clone()),
            nation: TypedCache::new(kinds::NATION, connection.clone()),
            category: TypedCache::new(kinds::CATEGORY, connection.clone()),
            subcategory: TypedCache::new(kinds::SUBCATEGORY, connection.clone()),
            ingredient: TypedCache::new(kinds::INGREDIENT, connection.clone()),
            image: TypedCache::new(kinds::RECIPE_IMAGE, connection.clone()),
            recipe_ingredient: TypedCache::new(kinds::RECIPE_INGREDIENT, connection.clone()),
            connection,
        }
    }

    pub fn disabled() -> Self {
        Self::new(CacheConnection::disabled())
    }

    pub fn connection(&self) -> &CacheConnection {
        &self.connection
    }

    /// Drops the detail view of every listed recipe.
    pub async fn invalidate_recipe_details(&self, recipe_ids: &[i32]) {
        if recipe_ids.is_empty() {
            return;
        }
        tracing::debug!(count = recipe_ids.len(), "Invalidating recipe details");
        join_all(
            recipe_ids
                .iter()
                .map(|id| self.recipe_detail.invalidate_cache(*id)),
        )
        .await;
    }
}
