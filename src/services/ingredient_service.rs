use std::sync::Arc;

use futures::future::join_all;

use crate::cache::EntityCaches;
use crate::error::{AppError, AppResult};
use crate::models::{Ingredient, NewIngredient, UpdateIngredient};
use crate::repositories::{IngredientRepo, RecipeRepo};

/// Ingredient CRUD. Renames and deletes reach into the detail views of
/// every recipe that uses the ingredient.
#[derive(Clone)]
pub struct IngredientService {
    repo: Arc<dyn IngredientRepo>,
    recipes: Arc<dyn RecipeRepo>,
    caches: EntityCaches,
}

impl IngredientService {
    pub fn new(
        repo: Arc<dyn IngredientRepo>,
        recipes: Arc<dyn RecipeRepo>,
        caches: EntityCaches,
    ) -> Self {
        Self {
            repo,
            recipes,
            caches,
        }
    }

    pub async fn create_ingredient(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient> {
        self.repo.create(new_ingredient).await
    }

    pub async fn get_ingredient(&self, id: i32) -> AppResult<Ingredient> {
        self.caches
            .ingredient
            .read_through(id, || self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("ingredient", id))
    }

    pub async fn list_ingredients(&self, offset: i64, limit: i64) -> AppResult<(Vec<Ingredient>, i64)> {
        let (ingredients, total) = self.repo.list_paginated(offset, limit).await?;
        self.caches
            .ingredient
            .populate(ingredients.iter().map(|i| (i.id, i)))
            .await;
        Ok((ingredients, total))
    }

    pub async fn update_ingredient(&self, id: i32, changes: UpdateIngredient) -> AppResult<Ingredient> {
        if changes.is_empty() {
            return self.get_ingredient(id).await;
        }

        let ingredient = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("ingredient", id))?;

        self.caches.ingredient.invalidate_cache(id).await;
        let recipe_ids = self.recipes.ids_by_ingredient(id).await?;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(ingredient)
    }

    pub async fn delete_ingredient(&self, id: i32) -> AppResult<()> {
        // The links cascade away with the row.
        let recipe_ids = self.recipes.ids_by_ingredient(id).await?;
        let link_ids = self.recipes.link_ids_by_ingredient(id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::not_found("ingredient", id));
        }

        self.caches.ingredient.invalidate_cache(id).await;
        join_all(
            link_ids
                .iter()
                .map(|link_id| self.caches.recipe_ingredient.invalidate_cache(*link_id)),
        )
        .await;
        self.caches.invalidate_recipe_details(&recipe_ids).await;

        tracing::info!(ingredient_id = id, recipes = recipe_ids.len(), "Ingredient deleted");
        Ok(())
    }
}
