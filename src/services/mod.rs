//! Service layer for business logic operations.
//!
//! Services sit between handlers and repositories and own all cache
//! bookkeeping: read-through on single-row gets, warming after list
//! queries, and invalidation after every mutation.

mod category_service;
mod ingredient_service;
mod recipe_service;
mod region_service;
#[cfg(test)]
pub(crate) mod test_support;

pub use category_service::CategoryService;
pub use ingredient_service::IngredientService;
pub use recipe_service::RecipeService;
pub use region_service::RegionService;

use std::sync::Arc;

use crate::cache::EntityCaches;
use crate::repositories::{RecipeRepo, Repositories};

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since underlying pools and cache handles use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub recipes: RecipeService,
    pub ingredients: IngredientService,
    pub categories: CategoryService,
    pub regions: RegionService,
}

impl Services {
    pub fn new(repos: Repositories, caches: EntityCaches) -> Self {
        let recipes: Arc<dyn RecipeRepo> = Arc::new(repos.recipes);
        Self {
            recipes: RecipeService::new(recipes.clone(), caches.clone()),
            ingredients: IngredientService::new(
                Arc::new(repos.ingredients),
                recipes.clone(),
                caches.clone(),
            ),
            categories: CategoryService::new(
                Arc::new(repos.categories),
                recipes.clone(),
                caches.clone(),
            ),
            regions: RegionService::new(Arc::new(repos.regions), recipes, caches),
        }
    }
}
