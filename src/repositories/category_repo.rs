//! Categories and the subcategories that hang off them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::CategoryRepo;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewCategory, NewSubcategory, Subcategory, UpdateSubcategory};
use crate::schema::{categories, subcategories};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepo for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, category_id: i32) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await?;

        categories::table
            .find(category_id)
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Category>, i64)> {
        let mut conn = self.pool.get().await?;

        let total: i64 = categories::table.count().get_result(&mut conn).await?;
        let rows = categories::table
            .order((categories::name.asc(), categories::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Category::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn rename(&self, category_id: i32, new_name: String) -> AppResult<Option<Category>> {
        let mut conn = self.pool.get().await?;

        diesel::update(categories::table.find(category_id))
            .set(categories::name.eq(new_name))
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Subcategories and recipe links cascade.
    async fn delete(&self, category_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(categories::table.find(category_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    // Subcategories

    async fn create_subcategory(&self, new_subcategory: NewSubcategory) -> AppResult<Subcategory> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(subcategories::table)
            .values(&new_subcategory)
            .returning(Subcategory::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_subcategory(&self, subcategory_id: i32) -> AppResult<Option<Subcategory>> {
        let mut conn = self.pool.get().await?;

        subcategories::table
            .find(subcategory_id)
            .select(Subcategory::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_subcategories(&self, category_id: i32) -> AppResult<Vec<Subcategory>> {
        let mut conn = self.pool.get().await?;

        subcategories::table
            .filter(subcategories::category_id.eq(category_id))
            .order((subcategories::name.asc(), subcategories::id.asc()))
            .select(Subcategory::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update_subcategory(
        &self,
        subcategory_id: i32,
        changes: UpdateSubcategory,
    ) -> AppResult<Option<Subcategory>> {
        let mut conn = self.pool.get().await?;

        diesel::update(subcategories::table.find(subcategory_id))
            .set(&changes)
            .returning(Subcategory::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn delete_subcategory(&self, subcategory_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(subcategories::table.find(subcategory_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
