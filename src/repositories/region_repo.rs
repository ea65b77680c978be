//! Regions and nations, and the relational side of the region detail view.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::cache::DetailSource;
use super::RegionRepo;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Association, IncludeSpec, Nation, NewNation, NewRegion, Region, RegionDetail, RegionGraph,
    UpdateNation, UpdateRegion,
};
use crate::schema::{nations, regions};

#[derive(Clone)]
pub struct RegionRepository {
    pool: AsyncDbPool,
}

impl RegionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRepo for RegionRepository {
    async fn create(&self, new_region: NewRegion) -> AppResult<Region> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(regions::table)
            .values(&new_region)
            .returning(Region::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, region_id: i32) -> AppResult<Option<Region>> {
        let mut conn = self.pool.get().await?;

        regions::table
            .find(region_id)
            .select(Region::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Region>, i64)> {
        let mut conn = self.pool.get().await?;

        let total: i64 = regions::table.count().get_result(&mut conn).await?;
        let rows = regions::table
            .order((regions::name.asc(), regions::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Region::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn update(&self, region_id: i32, changes: UpdateRegion) -> AppResult<Option<Region>> {
        let mut conn = self.pool.get().await?;

        diesel::update(regions::table.find(region_id))
            .set(&changes)
            .returning(Region::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Fails with a validation error while nations still reference the region.
    async fn delete(&self, region_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(regions::table.find(region_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    // Nations

    async fn create_nation(&self, new_nation: NewNation) -> AppResult<Nation> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(nations::table)
            .values(&new_nation)
            .returning(Nation::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_nation(&self, nation_id: i32) -> AppResult<Option<Nation>> {
        let mut conn = self.pool.get().await?;

        nations::table
            .find(nation_id)
            .select(Nation::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list_nations_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Nation>, i64)> {
        let mut conn = self.pool.get().await?;

        let total: i64 = nations::table.count().get_result(&mut conn).await?;
        let rows = nations::table
            .order((nations::name.asc(), nations::id.asc()))
            .offset(offset)
            .limit(limit)
            .select(Nation::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn update_nation(
        &self,
        nation_id: i32,
        changes: UpdateNation,
    ) -> AppResult<Option<Nation>> {
        let mut conn = self.pool.get().await?;

        diesel::update(nations::table.find(nation_id))
            .set(&changes)
            .returning(Nation::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Returns the deleted row so callers know which region it belonged to.
    async fn delete_nation(&self, nation_id: i32) -> AppResult<Option<Nation>> {
        let mut conn = self.pool.get().await?;

        diesel::delete(nations::table.find(nation_id))
            .returning(Nation::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}

impl RegionRepository {
    pub async fn fetch_graph(
        &self,
        region_id: i32,
        include: &IncludeSpec,
    ) -> AppResult<Option<RegionGraph>> {
        let mut conn = self.pool.get().await?;

        let Some(region) = regions::table
            .find(region_id)
            .select(Region::as_select())
            .first(&mut conn)
            .await
            .optional()?
        else {
            return Ok(None);
        };

        let nations = if include.contains(Association::Nations) {
            Nation::belonging_to(&region)
                .select(Nation::as_select())
                .load(&mut conn)
                .await?
        } else {
            Vec::new()
        };

        Ok(Some(RegionGraph { region, nations }))
    }
}

#[async_trait]
impl DetailSource for RegionRepository {
    type Graph = RegionGraph;
    type View = RegionDetail;

    fn default_include(&self) -> IncludeSpec {
        IncludeSpec::new([Association::Nations])
    }

    async fn fetch_with_includes(
        &self,
        id: i32,
        include: &IncludeSpec,
    ) -> AppResult<Option<RegionGraph>> {
        self.fetch_graph(id, include).await
    }

    fn assemble(&self, graph: RegionGraph) -> RegionDetail {
        RegionDetail::assemble(graph)
    }
}
