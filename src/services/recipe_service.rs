//! Recipe operations and the cache bookkeeping that goes with them.
//!
//! Every mutation of a recipe or one of its child collections drops the
//! recipe's detail entry; flat entries are dropped for the rows touched.

use std::sync::Arc;

use futures::future::join_all;

use crate::cache::{DetailAssembler, EntityCaches};
use crate::error::{AppError, AppResult};
use crate::models::{
    Alias, Category, IncludeSpec, Instruction, NewRecipe, NewRecipeImage, NewRecipeIngredient,
    Recipe, RecipeDetail, RecipeImage, RecipeIngredient, Subcategory, UpdateRecipe,
    UpdateRecipeIngredient,
};
use crate::repositories::RecipeRepo;

#[derive(Clone)]
pub struct RecipeService {
    repo: Arc<dyn RecipeRepo>,
    caches: EntityCaches,
    details: DetailAssembler<Arc<dyn RecipeRepo>>,
}

impl RecipeService {
    pub fn new(repo: Arc<dyn RecipeRepo>, caches: EntityCaches) -> Self {
        let details = DetailAssembler::new(repo.clone(), caches.recipe_detail.clone());
        Self {
            repo,
            caches,
            details,
        }
    }

    pub async fn create_recipe(&self, new_recipe: NewRecipe) -> AppResult<Recipe> {
        let recipe = self.repo.create(new_recipe).await?;
        tracing::info!(recipe_id = recipe.id, "Recipe created");
        Ok(recipe)
    }

    /// Read-through on the flat `recipe` entry.
    pub async fn get_recipe(&self, id: i32) -> AppResult<Recipe> {
        self.caches
            .recipe
            .read_through(id, || self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))
    }

    /// Lists a page and warms the flat cache with its rows.
    pub async fn list_recipes(&self, offset: i64, limit: i64) -> AppResult<(Vec<Recipe>, i64)> {
        let (recipes, total) = self.repo.list_paginated(offset, limit).await?;
        self.caches
            .recipe
            .populate(recipes.iter().map(|r| (r.id, r)))
            .await;
        Ok((recipes, total))
    }

    pub async fn update_recipe(&self, id: i32, changes: UpdateRecipe) -> AppResult<Recipe> {
        if changes.is_empty() {
            return self.get_recipe(id).await;
        }

        let recipe = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))?;

        self.invalidate_recipe(id).await;
        Ok(recipe)
    }

    pub async fn delete_recipe(&self, id: i32) -> AppResult<()> {
        // Child rows cascade, so collect their ids first.
        let images = self.repo.list_images(id).await?;
        let links = self.repo.list_ingredients(id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::not_found("recipe", id));
        }

        self.invalidate_recipe(id).await;
        join_all(images.iter().map(|img| self.caches.image.invalidate_cache(img.id))).await;
        join_all(
            links
                .iter()
                .map(|link| self.caches.recipe_ingredient.invalidate_cache(link.id)),
        )
        .await;

        tracing::info!(recipe_id = id, "Recipe deleted");
        Ok(())
    }

    /// Denormalized view. `include` other than the default is never cached.
    pub async fn get_recipe_details(
        &self,
        id: i32,
        include: Option<&IncludeSpec>,
    ) -> AppResult<RecipeDetail> {
        self.details
            .get_details(id, include)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))
    }

    pub async fn replace_instructions(
        &self,
        id: i32,
        steps: Vec<(i32, String)>,
    ) -> AppResult<Vec<Instruction>> {
        self.ensure_exists(id).await?;
        let instructions = self.repo.replace_instructions(id, steps).await?;
        self.details.invalidate(id).await;
        Ok(instructions)
    }

    pub async fn replace_aliases(&self, id: i32, names: Vec<String>) -> AppResult<Vec<Alias>> {
        self.ensure_exists(id).await?;
        let aliases = self.repo.replace_aliases(id, names).await?;
        self.details.invalidate(id).await;
        Ok(aliases)
    }

    pub async fn replace_categories(
        &self,
        id: i32,
        category_ids: Vec<i32>,
    ) -> AppResult<Vec<Category>> {
        self.ensure_exists(id).await?;
        let categories = self.repo.replace_categories(id, category_ids).await?;
        self.details.invalidate(id).await;
        Ok(categories)
    }

    pub async fn replace_subcategories(
        &self,
        id: i32,
        subcategory_ids: Vec<i32>,
    ) -> AppResult<Vec<Subcategory>> {
        self.ensure_exists(id).await?;
        let subcategories = self.repo.replace_subcategories(id, subcategory_ids).await?;
        self.details.invalidate(id).await;
        Ok(subcategories)
    }

    // Images

    pub async fn list_images(&self, id: i32) -> AppResult<Vec<RecipeImage>> {
        self.ensure_exists(id).await?;
        let images = self.repo.list_images(id).await?;
        self.caches
            .image
            .populate(images.iter().map(|img| (img.id, img)))
            .await;
        Ok(images)
    }

    pub async fn add_image(
        &self,
        id: i32,
        url: String,
        caption: Option<String>,
    ) -> AppResult<RecipeImage> {
        self.ensure_exists(id).await?;
        let image = self
            .repo
            .add_image(NewRecipeImage {
                recipe_id: id,
                url,
                caption,
            })
            .await?;
        self.details.invalidate(id).await;
        Ok(image)
    }

    pub async fn delete_image(&self, id: i32, image_id: i32) -> AppResult<()> {
        if self.repo.delete_image(id, image_id).await? == 0 {
            return Err(AppError::not_found("recipe image", image_id));
        }
        self.caches.image.invalidate_cache(image_id).await;
        self.details.invalidate(id).await;
        Ok(())
    }

    // Ingredient links

    pub async fn list_ingredients(&self, id: i32) -> AppResult<Vec<RecipeIngredient>> {
        self.ensure_exists(id).await?;
        let links = self.repo.list_ingredients(id).await?;
        self.caches
            .recipe_ingredient
            .populate(links.iter().map(|link| (link.id, link)))
            .await;
        Ok(links)
    }

    pub async fn add_ingredient(
        &self,
        id: i32,
        ingredient_id: i32,
        quantity: Option<String>,
        unit: Option<String>,
    ) -> AppResult<RecipeIngredient> {
        self.ensure_exists(id).await?;
        let link = self
            .repo
            .add_ingredient(NewRecipeIngredient {
                recipe_id: id,
                ingredient_id,
                quantity,
                unit,
            })
            .await?;
        self.details.invalidate(id).await;
        Ok(link)
    }

    pub async fn update_ingredient(
        &self,
        id: i32,
        ingredient_id: i32,
        changes: UpdateRecipeIngredient,
    ) -> AppResult<RecipeIngredient> {
        let link = if changes.is_empty() {
            self.repo.find_ingredient_link(id, ingredient_id).await?
        } else {
            self.repo.update_ingredient(id, ingredient_id, changes).await?
        }
        .ok_or_else(|| AppError::not_found("recipe ingredient", ingredient_id))?;

        self.caches.recipe_ingredient.invalidate_cache(link.id).await;
        self.details.invalidate(id).await;
        Ok(link)
    }

    pub async fn remove_ingredient(&self, id: i32, ingredient_id: i32) -> AppResult<()> {
        let link = self
            .repo
            .remove_ingredient(id, ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found("recipe ingredient", ingredient_id))?;

        self.caches.recipe_ingredient.invalidate_cache(link.id).await;
        self.details.invalidate(id).await;
        Ok(())
    }

    async fn ensure_exists(&self, id: i32) -> AppResult<()> {
        match self.repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("recipe", id)),
        }
    }

    async fn invalidate_recipe(&self, id: i32) {
        self.caches.recipe.invalidate_cache(id).await;
        self.details.invalidate(id).await;
    }
}
