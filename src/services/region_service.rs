//! Regions and nations.
//!
//! A nation change touches three kinds of cached views: the nation row,
//! the detail of the region(s) it belongs to, and the detail of every
//! recipe from that nation (which shows both names).

use std::sync::Arc;

use futures::future::join_all;

use crate::cache::{DetailAssembler, EntityCaches};
use crate::error::{AppError, AppResult};
use crate::models::{
    IncludeSpec, Nation, NewNation, NewRegion, Region, RegionDetail, UpdateNation, UpdateRegion,
};
use crate::repositories::{RecipeRepo, RegionRepo};

#[derive(Clone)]
pub struct RegionService {
    repo: Arc<dyn RegionRepo>,
    recipes: Arc<dyn RecipeRepo>,
    caches: EntityCaches,
    details: DetailAssembler<Arc<dyn RegionRepo>>,
}

impl RegionService {
    pub fn new(
        repo: Arc<dyn RegionRepo>,
        recipes: Arc<dyn RecipeRepo>,
        caches: EntityCaches,
    ) -> Self {
        let details = DetailAssembler::new(repo.clone(), caches.region_detail.clone());
        Self {
            repo,
            recipes,
            caches,
            details,
        }
    }

    pub async fn create_region(&self, new_region: NewRegion) -> AppResult<Region> {
        self.repo.create(new_region).await
    }

    pub async fn get_region(&self, id: i32) -> AppResult<Region> {
        self.caches
            .region
            .read_through(id, || self.repo.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("region", id))
    }

    pub async fn list_regions(&self, offset: i64, limit: i64) -> AppResult<(Vec<Region>, i64)> {
        let (regions, total) = self.repo.list_paginated(offset, limit).await?;
        self.caches
            .region
            .populate(regions.iter().map(|r| (r.id, r)))
            .await;
        Ok((regions, total))
    }

    pub async fn get_region_details(
        &self,
        id: i32,
        include: Option<&IncludeSpec>,
    ) -> AppResult<RegionDetail> {
        self.details
            .get_details(id, include)
            .await?
            .ok_or_else(|| AppError::not_found("region", id))
    }

    pub async fn update_region(&self, id: i32, changes: UpdateRegion) -> AppResult<Region> {
        if changes.is_empty() {
            return self.get_region(id).await;
        }

        let renamed = changes.name.is_some();
        let region = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("region", id))?;

        self.invalidate_region(id).await;
        if renamed {
            let recipe_ids = self.recipes.ids_by_region(id).await?;
            self.caches.invalidate_recipe_details(&recipe_ids).await;
        }
        Ok(region)
    }

    /// Refused while nations still belong to the region.
    pub async fn delete_region(&self, id: i32) -> AppResult<()> {
        if self.repo.delete(id).await? == 0 {
            return Err(AppError::not_found("region", id));
        }
        self.invalidate_region(id).await;
        Ok(())
    }

    // Nations

    pub async fn create_nation(&self, new_nation: NewNation) -> AppResult<Nation> {
        let nation = self.repo.create_nation(new_nation).await?;
        self.details.invalidate(nation.region_id).await;
        Ok(nation)
    }

    pub async fn get_nation(&self, id: i32) -> AppResult<Nation> {
        self.caches
            .nation
            .read_through(id, || self.repo.find_nation(id))
            .await?
            .ok_or_else(|| AppError::not_found("nation", id))
    }

    pub async fn list_nations(&self, offset: i64, limit: i64) -> AppResult<(Vec<Nation>, i64)> {
        let (nations, total) = self.repo.list_nations_paginated(offset, limit).await?;
        self.caches
            .nation
            .populate(nations.iter().map(|n| (n.id, n)))
            .await;
        Ok((nations, total))
    }

    pub async fn update_nation(&self, id: i32, changes: UpdateNation) -> AppResult<Nation> {
        if changes.is_empty() {
            return self.get_nation(id).await;
        }

        let before = self
            .repo
            .find_nation(id)
            .await?
            .ok_or_else(|| AppError::not_found("nation", id))?;
        let nation = self
            .repo
            .update_nation(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("nation", id))?;

        self.caches.nation.invalidate_cache(id).await;
        self.details.invalidate(before.region_id).await;
        if nation.region_id != before.region_id {
            self.details.invalidate(nation.region_id).await;
        }
        let recipe_ids = self.recipes.ids_by_nation(id).await?;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(nation)
    }

    /// Recipes of the nation keep existing with no nation.
    pub async fn delete_nation(&self, id: i32) -> AppResult<()> {
        let recipe_ids = self.recipes.ids_by_nation(id).await?;

        let nation = self
            .repo
            .delete_nation(id)
            .await?
            .ok_or_else(|| AppError::not_found("nation", id))?;

        self.caches.nation.invalidate_cache(id).await;
        self.details.invalidate(nation.region_id).await;
        // nation_id was nulled on these rows, so the flat entries are stale too
        join_all(recipe_ids.iter().map(|rid| self.caches.recipe.invalidate_cache(*rid))).await;
        self.caches.invalidate_recipe_details(&recipe_ids).await;
        Ok(())
    }

    async fn invalidate_region(&self, id: i32) {
        self.caches.region.invalidate_cache(id).await;
        self.details.invalidate(id).await;
    }
}
