//! Data-access contracts the services depend on.
//!
//! The diesel repositories are the production implementations; services
//! hold them as `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::cache::DetailSource;
use crate::error::AppResult;
use crate::models::{
    Alias, Category, Ingredient, Instruction, Nation, NewCategory, NewIngredient, NewNation,
    NewRecipe, NewRecipeImage, NewRecipeIngredient, NewRegion, NewSubcategory, Recipe,
    RecipeDetail, RecipeGraph, RecipeImage, RecipeIngredient, Region, RegionDetail, RegionGraph,
    Subcategory, UpdateIngredient, UpdateNation, UpdateRecipe, UpdateRecipeIngredient,
    UpdateRegion, UpdateSubcategory,
};

#[async_trait]
pub trait RecipeRepo: DetailSource<Graph = RecipeGraph, View = RecipeDetail> {
    async fn create(&self, new_recipe: NewRecipe) -> AppResult<Recipe>;
    async fn find_by_id(&self, recipe_id: i32) -> AppResult<Option<Recipe>>;
    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Recipe>, i64)>;
    async fn update(&self, recipe_id: i32, changes: UpdateRecipe) -> AppResult<Option<Recipe>>;
    async fn delete(&self, recipe_id: i32) -> AppResult<usize>;

    async fn replace_instructions(
        &self,
        recipe_id: i32,
        steps: Vec<(i32, String)>,
    ) -> AppResult<Vec<Instruction>>;
    async fn replace_aliases(&self, recipe_id: i32, names: Vec<String>) -> AppResult<Vec<Alias>>;
    async fn replace_categories(
        &self,
        recipe_id: i32,
        category_ids: Vec<i32>,
    ) -> AppResult<Vec<Category>>;
    async fn replace_subcategories(
        &self,
        recipe_id: i32,
        subcategory_ids: Vec<i32>,
    ) -> AppResult<Vec<Subcategory>>;

    async fn list_images(&self, recipe_id: i32) -> AppResult<Vec<RecipeImage>>;
    async fn add_image(&self, image: NewRecipeImage) -> AppResult<RecipeImage>;
    async fn delete_image(&self, recipe_id: i32, image_id: i32) -> AppResult<usize>;

    async fn list_ingredients(&self, recipe_id: i32) -> AppResult<Vec<RecipeIngredient>>;
    async fn find_ingredient_link(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<RecipeIngredient>>;
    async fn add_ingredient(&self, link: NewRecipeIngredient) -> AppResult<RecipeIngredient>;
    async fn update_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
        changes: UpdateRecipeIngredient,
    ) -> AppResult<Option<RecipeIngredient>>;
    async fn remove_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<RecipeIngredient>>;

    // Reverse lookups: ids of recipes whose detail view shows the entity.
    async fn ids_by_ingredient(&self, ingredient_id: i32) -> AppResult<Vec<i32>>;
    async fn link_ids_by_ingredient(&self, ingredient_id: i32) -> AppResult<Vec<i32>>;
    async fn ids_by_category(&self, category_id: i32) -> AppResult<Vec<i32>>;
    async fn ids_by_category_tree(&self, category_id: i32) -> AppResult<Vec<i32>>;
    async fn ids_by_subcategory(&self, subcategory_id: i32) -> AppResult<Vec<i32>>;
    async fn ids_by_nation(&self, nation_id: i32) -> AppResult<Vec<i32>>;
    async fn ids_by_region(&self, region_id: i32) -> AppResult<Vec<i32>>;
}

#[async_trait]
pub trait IngredientRepo: Send + Sync {
    async fn create(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient>;
    async fn find_by_id(&self, ingredient_id: i32) -> AppResult<Option<Ingredient>>;
    async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Ingredient>, i64)>;
    async fn update(
        &self,
        ingredient_id: i32,
        changes: UpdateIngredient,
    ) -> AppResult<Option<Ingredient>>;
    async fn delete(&self, ingredient_id: i32) -> AppResult<usize>;
}

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category>;
    async fn find_by_id(&self, category_id: i32) -> AppResult<Option<Category>>;
    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Category>, i64)>;
    async fn rename(&self, category_id: i32, new_name: String) -> AppResult<Option<Category>>;
    async fn delete(&self, category_id: i32) -> AppResult<usize>;

    async fn create_subcategory(&self, new_subcategory: NewSubcategory) -> AppResult<Subcategory>;
    async fn find_subcategory(&self, subcategory_id: i32) -> AppResult<Option<Subcategory>>;
    async fn list_subcategories(&self, category_id: i32) -> AppResult<Vec<Subcategory>>;
    async fn update_subcategory(
        &self,
        subcategory_id: i32,
        changes: UpdateSubcategory,
    ) -> AppResult<Option<Subcategory>>;
    async fn delete_subcategory(&self, subcategory_id: i32) -> AppResult<usize>;
}

#[async_trait]
pub trait RegionRepo: DetailSource<Graph = RegionGraph, View = RegionDetail> {
    async fn create(&self, new_region: NewRegion) -> AppResult<Region>;
    async fn find_by_id(&self, region_id: i32) -> AppResult<Option<Region>>;
    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Region>, i64)>;
    async fn update(&self, region_id: i32, changes: UpdateRegion) -> AppResult<Option<Region>>;
    async fn delete(&self, region_id: i32) -> AppResult<usize>;

    async fn create_nation(&self, new_nation: NewNation) -> AppResult<Nation>;
    async fn find_nation(&self, nation_id: i32) -> AppResult<Option<Nation>>;
    async fn list_nations_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Nation>, i64)>;
    async fn update_nation(
        &self,
        nation_id: i32,
        changes: UpdateNation,
    ) -> AppResult<Option<Nation>>;
    /// Returns the deleted row so callers know which region it belonged to.
    async fn delete_nation(&self, nation_id: i32) -> AppResult<Option<Nation>>;
}
