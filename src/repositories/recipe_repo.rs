//! Recipe repository: the recipe row, its child collections and the
//! relational side of the recipe detail view.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::cache::DetailSource;
use super::RecipeRepo;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    Alias, Association, Category, IncludeSpec, Ingredient, Instruction, Nation, NewAlias,
    NewInstruction, NewRecipe, NewRecipeImage, NewRecipeIngredient, Recipe, RecipeCategoryLink,
    RecipeDetail, RecipeGraph, RecipeImage, RecipeIngredient, RecipeSubcategoryLink, Region,
    Subcategory, UpdateRecipe, UpdateRecipeIngredient,
};
use crate::schema::{
    aliases, categories, ingredients, instructions, nations, recipe_categories, recipe_images,
    recipe_ingredients, recipe_subcategories, recipes, regions, subcategories,
};

#[derive(Clone)]
pub struct RecipeRepository {
    pool: AsyncDbPool,
}

impl RecipeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepo for RecipeRepository {
    async fn create(&self, new_recipe: NewRecipe) -> AppResult<Recipe> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, recipe_id: i32) -> AppResult<Option<Recipe>> {
        let mut conn = self.pool.get().await?;

        recipes::table
            .find(recipe_id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Returns one page ordered by id together with the total row count.
    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Recipe>, i64)> {
        let mut conn = self.pool.get().await?;

        let total: i64 = recipes::table.count().get_result(&mut conn).await?;
        let rows = recipes::table
            .order(recipes::id.asc())
            .offset(offset)
            .limit(limit)
            .select(Recipe::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// `Ok(None)` when no row has this id.
    async fn update(&self, recipe_id: i32, changes: UpdateRecipe) -> AppResult<Option<Recipe>> {
        let mut conn = self.pool.get().await?;

        diesel::update(recipes::table.find(recipe_id))
            .set(&changes)
            .returning(Recipe::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Number of deleted rows. Child rows go with the recipe.
    async fn delete(&self, recipe_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(recipes::table.find(recipe_id))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    // ------------------------------------------------------------------
    // Child collections
    // ------------------------------------------------------------------

    /// Replaces every instruction of the recipe in one transaction.
    async fn replace_instructions(
        &self,
        recipe_id: i32,
        steps: Vec<(i32, String)>,
    ) -> AppResult<Vec<Instruction>> {
        let rows: Vec<NewInstruction> = steps
            .into_iter()
            .map(|(step, body)| NewInstruction {
                recipe_id,
                step,
                body,
            })
            .collect();
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                diesel::delete(instructions::table.filter(instructions::recipe_id.eq(recipe_id)))
                    .execute(conn)
                    .await?;
                if rows.is_empty() {
                    return Ok(Vec::new());
                }
                let mut inserted = diesel::insert_into(instructions::table)
                    .values(&rows)
                    .returning(Instruction::as_returning())
                    .get_results(conn)
                    .await?;
                inserted.sort_by_key(|i: &Instruction| i.step);
                Ok(inserted)
            }
            .scope_boxed()
        })
        .await
    }

    async fn replace_aliases(&self, recipe_id: i32, names: Vec<String>) -> AppResult<Vec<Alias>> {
        let rows: Vec<NewAlias> = names
            .into_iter()
            .map(|name| NewAlias { recipe_id, name })
            .collect();
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                diesel::delete(aliases::table.filter(aliases::recipe_id.eq(recipe_id)))
                    .execute(conn)
                    .await?;
                if rows.is_empty() {
                    return Ok(Vec::new());
                }
                diesel::insert_into(aliases::table)
                    .values(&rows)
                    .returning(Alias::as_returning())
                    .get_results(conn)
                    .await
                    .map_err(AppError::from)
            }
            .scope_boxed()
        })
        .await
    }

    /// Replaces the category links and returns the linked categories by name.
    async fn replace_categories(
        &self,
        recipe_id: i32,
        category_ids: Vec<i32>,
    ) -> AppResult<Vec<Category>> {
        let links: Vec<RecipeCategoryLink> = dedup(category_ids)
            .into_iter()
            .map(|category_id| RecipeCategoryLink {
                recipe_id,
                category_id,
            })
            .collect();
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                diesel::delete(
                    recipe_categories::table.filter(recipe_categories::recipe_id.eq(recipe_id)),
                )
                .execute(conn)
                .await?;
                if !links.is_empty() {
                    diesel::insert_into(recipe_categories::table)
                        .values(&links)
                        .execute(conn)
                        .await?;
                }
                recipe_categories::table
                    .inner_join(categories::table)
                    .filter(recipe_categories::recipe_id.eq(recipe_id))
                    .order(categories::name.asc())
                    .select(Category::as_select())
                    .load(conn)
                    .await
                    .map_err(AppError::from)
            }
            .scope_boxed()
        })
        .await
    }

    async fn replace_subcategories(
        &self,
        recipe_id: i32,
        subcategory_ids: Vec<i32>,
    ) -> AppResult<Vec<Subcategory>> {
        let links: Vec<RecipeSubcategoryLink> = dedup(subcategory_ids)
            .into_iter()
            .map(|subcategory_id| RecipeSubcategoryLink {
                recipe_id,
                subcategory_id,
            })
            .collect();
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                diesel::delete(
                    recipe_subcategories::table
                        .filter(recipe_subcategories::recipe_id.eq(recipe_id)),
                )
                .execute(conn)
                .await?;
                if !links.is_empty() {
                    diesel::insert_into(recipe_subcategories::table)
                        .values(&links)
                        .execute(conn)
                        .await?;
                }
                recipe_subcategories::table
                    .inner_join(subcategories::table)
                    .filter(recipe_subcategories::recipe_id.eq(recipe_id))
                    .order(subcategories::name.asc())
                    .select(Subcategory::as_select())
                    .load(conn)
                    .await
                    .map_err(AppError::from)
            }
            .scope_boxed()
        })
        .await
    }

    async fn list_images(&self, recipe_id: i32) -> AppResult<Vec<RecipeImage>> {
        let mut conn = self.pool.get().await?;

        recipe_images::table
            .filter(recipe_images::recipe_id.eq(recipe_id))
            .order(recipe_images::id.asc())
            .select(RecipeImage::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn add_image(&self, image: NewRecipeImage) -> AppResult<RecipeImage> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(recipe_images::table)
            .values(&image)
            .returning(RecipeImage::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Only deletes the image when it belongs to `recipe_id`.
    async fn delete_image(&self, recipe_id: i32, image_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            recipe_images::table
                .filter(recipe_images::id.eq(image_id))
                .filter(recipe_images::recipe_id.eq(recipe_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }

    async fn list_ingredients(&self, recipe_id: i32) -> AppResult<Vec<RecipeIngredient>> {
        let mut conn = self.pool.get().await?;

        recipe_ingredients::table
            .filter(recipe_ingredients::recipe_id.eq(recipe_id))
            .order(recipe_ingredients::id.asc())
            .select(RecipeIngredient::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_ingredient_link(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<RecipeIngredient>> {
        let mut conn = self.pool.get().await?;

        recipe_ingredients::table
            .filter(recipe_ingredients::recipe_id.eq(recipe_id))
            .filter(recipe_ingredients::ingredient_id.eq(ingredient_id))
            .select(RecipeIngredient::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn add_ingredient(&self, link: NewRecipeIngredient) -> AppResult<RecipeIngredient> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(recipe_ingredients::table)
            .values(&link)
            .returning(RecipeIngredient::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
        changes: UpdateRecipeIngredient,
    ) -> AppResult<Option<RecipeIngredient>> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            recipe_ingredients::table
                .filter(recipe_ingredients::recipe_id.eq(recipe_id))
                .filter(recipe_ingredients::ingredient_id.eq(ingredient_id)),
        )
        .set(&changes)
        .returning(RecipeIngredient::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    /// Returns the removed link, if there was one.
    async fn remove_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<RecipeIngredient>> {
        let mut conn = self.pool.get().await?;

        diesel::delete(
            recipe_ingredients::table
                .filter(recipe_ingredients::recipe_id.eq(recipe_id))
                .filter(recipe_ingredients::ingredient_id.eq(ingredient_id)),
        )
        .returning(RecipeIngredient::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(AppError::from)
    }

    // ------------------------------------------------------------------
    // Reverse references, used to invalidate detail views
    // ------------------------------------------------------------------

    async fn ids_by_ingredient(&self, ingredient_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        recipe_ingredients::table
            .filter(recipe_ingredients::ingredient_id.eq(ingredient_id))
            .select(recipe_ingredients::recipe_id)
            .distinct()
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Ids of the link rows, not of the recipes.
    async fn link_ids_by_ingredient(&self, ingredient_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        recipe_ingredients::table
            .filter(recipe_ingredients::ingredient_id.eq(ingredient_id))
            .select(recipe_ingredients::id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn ids_by_category(&self, category_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        recipe_categories::table
            .filter(recipe_categories::category_id.eq(category_id))
            .select(recipe_categories::recipe_id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Recipes linked to any subcategory of `category_id` count too, their
    /// detail views carry the subcategory names.
    async fn ids_by_category_tree(&self, category_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        let mut ids: Vec<i32> = recipe_categories::table
            .filter(recipe_categories::category_id.eq(category_id))
            .select(recipe_categories::recipe_id)
            .load(&mut conn)
            .await?;
        let via_subcategories: Vec<i32> = recipe_subcategories::table
            .inner_join(subcategories::table)
            .filter(subcategories::category_id.eq(category_id))
            .select(recipe_subcategories::recipe_id)
            .load(&mut conn)
            .await?;

        ids.extend(via_subcategories);
        Ok(dedup(ids))
    }

    async fn ids_by_subcategory(&self, subcategory_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        recipe_subcategories::table
            .filter(recipe_subcategories::subcategory_id.eq(subcategory_id))
            .select(recipe_subcategories::recipe_id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn ids_by_nation(&self, nation_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        recipes::table
            .filter(recipes::nation_id.eq(nation_id))
            .select(recipes::id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn ids_by_region(&self, region_id: i32) -> AppResult<Vec<i32>> {
        let mut conn = self.pool.get().await?;

        recipes::table
            .inner_join(nations::table)
            .filter(nations::region_id.eq(region_id))
            .select(recipes::id)
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

impl RecipeRepository {
    /// Loads the recipe and the associations named in `include`.
    pub async fn fetch_graph(
        &self,
        recipe_id: i32,
        include: &IncludeSpec,
    ) -> AppResult<Option<RecipeGraph>> {
        let mut conn = self.pool.get().await?;

        let Some(recipe) = recipes::table
            .find(recipe_id)
            .select(Recipe::as_select())
            .first(&mut conn)
            .await
            .optional()?
        else {
            return Ok(None);
        };

        let mut graph = RecipeGraph::new(recipe);

        let wants_nation = include.contains(Association::Nation);
        let wants_region = include.contains(Association::Region);
        if let Some(nation_id) = graph.recipe.nation_id.filter(|_| wants_nation || wants_region) {
            let nation: Option<Nation> = nations::table
                .find(nation_id)
                .select(Nation::as_select())
                .first(&mut conn)
                .await
                .optional()?;

            if wants_region {
                if let Some(region_id) = nation.as_ref().map(|n| n.region_id) {
                    graph.region = regions::table
                        .find(region_id)
                        .select(Region::as_select())
                        .first(&mut conn)
                        .await
                        .optional()?;
                }
            }
            if wants_nation {
                graph.nation = nation;
            }
        }

        if include.contains(Association::Categories) {
            graph.categories = recipe_categories::table
                .inner_join(categories::table)
                .filter(recipe_categories::recipe_id.eq(recipe_id))
                .order(categories::name.asc())
                .select(Category::as_select())
                .load(&mut conn)
                .await?;
        }

        if include.contains(Association::Subcategories) {
            graph.subcategories = recipe_subcategories::table
                .inner_join(subcategories::table)
                .filter(recipe_subcategories::recipe_id.eq(recipe_id))
                .order(subcategories::name.asc())
                .select(Subcategory::as_select())
                .load(&mut conn)
                .await?;
        }

        if include.contains(Association::Instructions) {
            graph.instructions = instructions::table
                .filter(instructions::recipe_id.eq(recipe_id))
                .select(Instruction::as_select())
                .load(&mut conn)
                .await?;
        }

        if include.contains(Association::Aliases) {
            graph.aliases = aliases::table
                .filter(aliases::recipe_id.eq(recipe_id))
                .order(aliases::id.asc())
                .select(Alias::as_select())
                .load(&mut conn)
                .await?;
        }

        if include.contains(Association::Images) {
            graph.images = recipe_images::table
                .filter(recipe_images::recipe_id.eq(recipe_id))
                .order(recipe_images::id.asc())
                .select(RecipeImage::as_select())
                .load(&mut conn)
                .await?;
        }

        if include.contains(Association::Ingredients) {
            graph.ingredients = recipe_ingredients::table
                .inner_join(ingredients::table)
                .filter(recipe_ingredients::recipe_id.eq(recipe_id))
                .order(ingredients::name.asc())
                .select((RecipeIngredient::as_select(), Ingredient::as_select()))
                .load(&mut conn)
                .await?;
        }

        Ok(Some(graph))
    }
}

#[async_trait]
impl DetailSource for RecipeRepository {
    type Graph = RecipeGraph;
    type View = RecipeDetail;

    fn default_include(&self) -> IncludeSpec {
        recipe_default_include()
    }

    async fn fetch_with_includes(
        &self,
        id: i32,
        include: &IncludeSpec,
    ) -> AppResult<Option<RecipeGraph>> {
        self.fetch_graph(id, include).await
    }

    fn assemble(&self, graph: RecipeGraph) -> RecipeDetail {
        RecipeDetail::assemble(graph)
    }
}

/// Everything a recipe detail view can show.
pub fn recipe_default_include() -> IncludeSpec {
    IncludeSpec::new([
        Association::Nation,
        Association::Region,
        Association::Categories,
        Association::Subcategories,
        Association::Instructions,
        Association::Aliases,
        Association::Images,
        Association::Ingredients,
    ])
}

/// Sorted, without repeats.
fn dedup(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_include_covers_every_recipe_association() {
        let spec = recipe_default_include();
        for association in Association::ALL {
            assert_eq!(
                spec.contains(association),
                association != Association::Nations,
                "{}",
                association.as_str()
            );
        }
    }

    #[test]
    fn test_dedup() {
        assert_eq!(dedup(vec![3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(dedup(Vec::new()).is_empty());
    }
}
