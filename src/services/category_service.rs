//! Categories and subcategories.

use std::sync::Arc;

use futures::future::join_all;

use crate::cache::EntityCaches;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, NewSubcategory, Subcategory, UpdateSubcategory};
use crate::repositories::{CategoryRepo, RecipeRepo};

#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryRepo>,
    recipes: Arc<dyn RecipeRepo>,
    caches: EntityCaches,
}

impl CategoryService {
    pub fn new(
        repo: Arc<dyn CategoryRepo>,
        recipes: Arc<dyn RecipeRepo>,
        caches: EntityCaches,
    ) -> Self {
        Self {
            repo,
            recipes,
            caches,
        }
    }

    pub async fn create_category(&self, name: String) -> AppResult<Category> {
        self.repo.create(NewCategory { name }).await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.caches
            .category
            .read_through(id, || self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("category", id))
    }

    pub async fn list_categories(&self, offset: i64, limit: i64) -> AppResult<(Vec<Category>, i64)> {
        let (categories, total) = self.repo.list_paginated(offset, limit).await?;
        self.caches
            .category
            .populate(categories.iter().map(|c| (c.id, c)))
            .await;
        Ok((categories, total))
    }

    pub async fn rename_category(&self, id: i32, name: String) -> AppResult<Category> {
        let category = self
            .repo
            .rename(id, name)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))?;

        self.caches.category.invalidate_cache(id).await;
        let recipe_ids = self.recipes.ids_by_category(id).await?;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(category)
    }

    /// Removes the category with its subcategories and every recipe link to either.
    pub async fn delete_category(&self, id: i32) -> AppResult<()> {
        let recipe_ids = self.recipes.ids_by_category_tree(id).await?;
        let subcategories = self.repo.list_subcategories(id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::not_found("category", id));
        }

        self.caches.category.invalidate_cache(id).await;
        join_all(
            subcategories
                .iter()
                .map(|s| self.caches.subcategory.invalidate_cache(s.id)),
        )
        .await;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(())
    }

    pub async fn create_subcategory(&self, category_id: i32, name: String) -> AppResult<Subcategory> {
        self.ensure_category(category_id).await?;
        self.repo
            .create_subcategory(NewSubcategory { name, category_id })
            .await
    }

    pub async fn list_subcategories(&self, category_id: i32) -> AppResult<Vec<Subcategory>> {
        self.ensure_category(category_id).await?;
        let subcategories = self.repo.list_subcategories(category_id).await?;
        self.caches
            .subcategory
            .populate(subcategories.iter().map(|s| (s.id, s)))
            .await;
        Ok(subcategories)
    }

    pub async fn get_subcategory(&self, id: i32) -> AppResult<Subcategory> {
        self.caches
            .subcategory
            .read_through(id, || self.repo.find_subcategory(id))
            .await?
            .ok_or_else(|| AppError::not_found("subcategory", id))
    }

    pub async fn update_subcategory(
        &self,
        id: i32,
        changes: UpdateSubcategory,
    ) -> AppResult<Subcategory> {
        if changes.is_empty() {
            return self.get_subcategory(id).await;
        }

        let subcategory = self
            .repo
            .update_subcategory(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("subcategory", id))?;

        self.caches.subcategory.invalidate_cache(id).await;
        let recipe_ids = self.recipes.ids_by_subcategory(id).await?;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(subcategory)
    }

    pub async fn delete_subcategory(&self, id: i32) -> AppResult<()> {
        let recipe_ids = self.recipes.ids_by_subcategory(id).await?;

        if self.repo.delete_subcategory(id).await? == 0 {
            return Err(AppError::not_found("subcategory", id));
        }

        self.caches.subcategory.invalidate_cache(id).await;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(())
    }

    async fn ensure_category(&self, id: i32) -> AppResult<()> {
        self.repo
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("category", id))
    }
}
