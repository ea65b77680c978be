//! Repository layer for data access operations.
//!
//! Each repository owns a clone of the async connection pool and maps
//! diesel errors into `AppError`. Services see them through the traits in
//! `traits`.

mod category_repo;
mod ingredient_repo;
mod recipe_repo;
mod region_repo;
mod traits;

pub use category_repo::CategoryRepository;
pub use ingredient_repo::IngredientRepository;
pub use recipe_repo::{RecipeRepository, recipe_default_include};
pub use region_repo::RegionRepository;
pub use traits::{CategoryRepo, IngredientRepo, RecipeRepo, RegionRepo};

use crate::db::AsyncDbPool;

/// Aggregates all repositories.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub recipes: RecipeRepository,
    pub ingredients: IngredientRepository,
    pub categories: CategoryRepository,
    pub regions: RegionRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            recipes: RecipeRepository::new(pool.clone()),
            ingredients: IngredientRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            regions: RegionRepository::new(pool),
        }
    }
}
