use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::IngredientRepo;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Ingredient, NewIngredient, UpdateIngredient};
use crate::schema::ingredients::dsl::*;

#[derive(Clone)]
pub struct IngredientRepository {
    pool: AsyncDbPool,
}

impl IngredientRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepo for IngredientRepository {
    async fn create(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(ingredients)
            .values(&new_ingredient)
            .returning(Ingredient::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, ingredient_id: i32) -> AppResult<Option<Ingredient>> {
        let mut conn = self.pool.get().await?;

        ingredients
            .filter(id.eq(ingredient_id))
            .select(Ingredient::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// One page ordered by name, plus the total count.
    async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Ingredient>, i64)> {
        let mut conn = self.pool.get().await?;

        let total: i64 = ingredients.count().get_result(&mut conn).await?;
        let rows = ingredients
            .order((name.asc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Ingredient::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn update(
        &self,
        ingredient_id: i32,
        changes: UpdateIngredient,
    ) -> AppResult<Option<Ingredient>> {
        let mut conn = self.pool.get().await?;

        diesel::update(ingredients.filter(id.eq(ingredient_id)))
            .set(&changes)
            .returning(Ingredient::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Also drops every recipe link to the ingredient.
    async fn delete(&self, ingredient_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(ingredients.filter(id.eq(ingredient_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
