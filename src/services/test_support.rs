//! In-memory catalog behind the repository traits, plus a memory-backed
//! `EntityCaches`, for exercising services without PostgreSQL.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::Services;
use crate::cache::test_support::RecordingObserver;
use crate::cache::{CacheConnection, DetailSource, EntityCaches, MemoryStore};
use crate::error::{AppError, AppResult};
use crate::models::{
    Alias, Association, Category, IncludeSpec, Ingredient, Instruction, Nation, NewCategory,
    NewIngredient, NewNation, NewRecipe, NewRecipeImage, NewRecipeIngredient, NewRegion,
    NewSubcategory, Recipe, RecipeDetail, RecipeGraph, RecipeImage, RecipeIngredient, Region,
    RegionDetail, RegionGraph, Subcategory, UpdateIngredient, UpdateNation, UpdateRecipe,
    UpdateRecipeIngredient, UpdateRegion, UpdateSubcategory,
};
use crate::repositories::{
    CategoryRepo, IngredientRepo, RecipeRepo, RegionRepo, recipe_default_include,
};

#[derive(Default)]
pub(crate) struct CatalogState {
    next_id: i32,
    pub recipes: BTreeMap<i32, Recipe>,
    pub instructions: Vec<Instruction>,
    pub aliases: Vec<Alias>,
    pub images: Vec<RecipeImage>,
    pub links: Vec<RecipeIngredient>,
    pub recipe_categories: Vec<(i32, i32)>,
    pub recipe_subcategories: Vec<(i32, i32)>,
    pub ingredients: BTreeMap<i32, Ingredient>,
    pub categories: BTreeMap<i32, Category>,
    pub subcategories: BTreeMap<i32, Subcategory>,
    pub regions: BTreeMap<i32, Region>,
    pub nations: BTreeMap<i32, Nation>,
}

impl CatalogState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn recipe_ids_where(&self, pairs: &[(i32, i32)], key: i32) -> Vec<i32> {
        let mut ids: Vec<i32> = pairs
            .iter()
            .filter(|(_, other)| *other == key)
            .map(|(recipe_id, _)| *recipe_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Shared rows; every table view below reads and writes the same state.
#[derive(Clone, Default)]
pub(crate) struct Catalog(Arc<Mutex<CatalogState>>);

impl Catalog {
    pub fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.0.lock().unwrap()
    }

    pub fn recipes(&self) -> RecipeRows {
        RecipeRows(self.clone())
    }

    pub fn regions(&self) -> RegionRows {
        RegionRows(self.clone())
    }
}

pub(crate) struct RecipeRows(Catalog);
pub(crate) struct RegionRows(Catalog);

/// Caches on a fresh `MemoryStore`.
pub(crate) fn memory_caches() -> EntityCaches {
    EntityCaches::new(CacheConnection::new(
        Some(Arc::new(MemoryStore::new(1000, 3600))),
        Arc::new(RecordingObserver::default()),
        3600,
    ))
}

pub(crate) fn services(catalog: &Catalog, caches: EntityCaches) -> Services {
    let recipes: Arc<dyn RecipeRepo> = Arc::new(catalog.recipes());
    Services {
        recipes: super::RecipeService::new(recipes.clone(), caches.clone()),
        ingredients: super::IngredientService::new(
            Arc::new(catalog.clone()),
            recipes.clone(),
            caches.clone(),
        ),
        categories: super::CategoryService::new(
            Arc::new(catalog.clone()),
            recipes.clone(),
            caches.clone(),
        ),
        regions: super::RegionService::new(Arc::new(catalog.regions()), recipes, caches),
    }
}

fn page<T: Clone>(rows: &BTreeMap<i32, T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
    let items = rows
        .values()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect();
    (items, rows.len() as i64)
}

#[async_trait]
impl DetailSource for RecipeRows {
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
        let state = self.0.state();
        let Some(recipe) = state.recipes.get(&id).cloned() else {
            return Ok(None);
        };
        let mut graph = RecipeGraph::new(recipe);

        let nation = graph
            .recipe
            .nation_id
            .and_then(|nid| state.nations.get(&nid).cloned());
        if include.contains(Association::Region) {
            graph.region = nation
                .as_ref()
                .and_then(|n| state.regions.get(&n.region_id).cloned());
        }
        if include.contains(Association::Nation) {
            graph.nation = nation;
        }
        if include.contains(Association::Categories) {
            graph.categories = state
                .recipe_categories
                .iter()
                .filter(|(rid, _)| *rid == id)
                .filter_map(|(_, cid)| state.categories.get(cid).cloned())
                .collect();
        }
        if include.contains(Association::Subcategories) {
            graph.subcategories = state
                .recipe_subcategories
                .iter()
                .filter(|(rid, _)| *rid == id)
                .filter_map(|(_, sid)| state.subcategories.get(sid).cloned())
                .collect();
        }
        if include.contains(Association::Instructions) {
            graph.instructions = state
                .instructions
                .iter()
                .filter(|i| i.recipe_id == id)
                .cloned()
                .collect();
        }
        if include.contains(Association::Aliases) {
            graph.aliases = state.aliases.iter().filter(|a| a.recipe_id == id).cloned().collect();
        }
        if include.contains(Association::Images) {
            graph.images = state.images.iter().filter(|i| i.recipe_id == id).cloned().collect();
        }
        if include.contains(Association::Ingredients) {
            graph.ingredients = state
                .links
                .iter()
                .filter(|l| l.recipe_id == id)
                .filter_map(|l| {
                    state
                        .ingredients
                        .get(&l.ingredient_id)
                        .map(|ing| (l.clone(), ing.clone()))
                })
                .collect();
        }
        Ok(Some(graph))
    }

    fn assemble(&self, graph: RecipeGraph) -> RecipeDetail {
        RecipeDetail::assemble(graph)
    }
}

#[async_trait]
impl RecipeRepo for RecipeRows {
    async fn create(&self, new_recipe: NewRecipe) -> AppResult<Recipe> {
        let mut state = self.0.state();
        let recipe = Recipe {
            id: state.next_id(),
            name: new_recipe.name,
            description: new_recipe.description,
            nation_id: new_recipe.nation_id,
            prep_minutes: new_recipe.prep_minutes,
            cook_minutes: new_recipe.cook_minutes,
            servings: new_recipe.servings,
        };
        state.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id(&self, recipe_id: i32) -> AppResult<Option<Recipe>> {
        Ok(self.0.state().recipes.get(&recipe_id).cloned())
    }

    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Recipe>, i64)> {
        Ok(page(&self.0.state().recipes, offset, limit))
    }

    async fn update(&self, recipe_id: i32, changes: UpdateRecipe) -> AppResult<Option<Recipe>> {
        let mut state = self.0.state();
        Ok(state.recipes.get_mut(&recipe_id).map(|recipe| {
            if let Some(name) = changes.name {
                recipe.name = name;
            }
            if changes.description.is_some() {
                recipe.description = changes.description;
            }
            if changes.nation_id.is_some() {
                recipe.nation_id = changes.nation_id;
            }
            recipe.clone()
        }))
    }

    async fn delete(&self, recipe_id: i32) -> AppResult<usize> {
        let mut state = self.0.state();
        if state.recipes.remove(&recipe_id).is_none() {
            return Ok(0);
        }
        state.instructions.retain(|i| i.recipe_id != recipe_id);
        state.aliases.retain(|a| a.recipe_id != recipe_id);
        state.images.retain(|i| i.recipe_id != recipe_id);
        state.links.retain(|l| l.recipe_id != recipe_id);
        state.recipe_categories.retain(|(rid, _)| *rid != recipe_id);
        state.recipe_subcategories.retain(|(rid, _)| *rid != recipe_id);
        Ok(1)
    }

    async fn replace_instructions(
        &self,
        recipe_id: i32,
        steps: Vec<(i32, String)>,
    ) -> AppResult<Vec<Instruction>> {
        let mut state = self.0.state();
        state.instructions.retain(|i| i.recipe_id != recipe_id);
        let mut created = Vec::new();
        for (step, body) in steps {
            let instruction = Instruction {
                id: state.next_id(),
                recipe_id,
                step,
                body,
            };
            state.instructions.push(instruction.clone());
            created.push(instruction);
        }
        Ok(created)
    }

    async fn replace_aliases(&self, recipe_id: i32, names: Vec<String>) -> AppResult<Vec<Alias>> {
        let mut state = self.0.state();
        state.aliases.retain(|a| a.recipe_id != recipe_id);
        let mut created = Vec::new();
        for name in names {
            let alias = Alias {
                id: state.next_id(),
                recipe_id,
                name,
            };
            state.aliases.push(alias.clone());
            created.push(alias);
        }
        Ok(created)
    }

    async fn replace_categories(
        &self,
        recipe_id: i32,
        category_ids: Vec<i32>,
    ) -> AppResult<Vec<Category>> {
        let mut state = self.0.state();
        state.recipe_categories.retain(|(rid, _)| *rid != recipe_id);
        state
            .recipe_categories
            .extend(category_ids.iter().map(|cid| (recipe_id, *cid)));
        Ok(category_ids
            .iter()
            .filter_map(|cid| state.categories.get(cid).cloned())
            .collect())
    }

    async fn replace_subcategories(
        &self,
        recipe_id: i32,
        subcategory_ids: Vec<i32>,
    ) -> AppResult<Vec<Subcategory>> {
        let mut state = self.0.state();
        state.recipe_subcategories.retain(|(rid, _)| *rid != recipe_id);
        state
            .recipe_subcategories
            .extend(subcategory_ids.iter().map(|sid| (recipe_id, *sid)));
        Ok(subcategory_ids
            .iter()
            .filter_map(|sid| state.subcategories.get(sid).cloned())
            .collect())
    }

    async fn list_images(&self, recipe_id: i32) -> AppResult<Vec<RecipeImage>> {
        let state = self.0.state();
        Ok(state.images.iter().filter(|i| i.recipe_id == recipe_id).cloned().collect())
    }

    async fn add_image(&self, image: NewRecipeImage) -> AppResult<RecipeImage> {
        let mut state = self.0.state();
        let image = RecipeImage {
            id: state.next_id(),
            recipe_id: image.recipe_id,
            url: image.url,
            caption: image.caption,
        };
        state.images.push(image.clone());
        Ok(image)
    }

    async fn delete_image(&self, recipe_id: i32, image_id: i32) -> AppResult<usize> {
        let mut state = self.0.state();
        let before = state.images.len();
        state
            .images
            .retain(|i| !(i.recipe_id == recipe_id && i.id == image_id));
        Ok(before - state.images.len())
    }

    async fn list_ingredients(&self, recipe_id: i32) -> AppResult<Vec<RecipeIngredient>> {
        let state = self.0.state();
        Ok(state.links.iter().filter(|l| l.recipe_id == recipe_id).cloned().collect())
    }

    async fn find_ingredient_link(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<RecipeIngredient>> {
        let state = self.0.state();
        Ok(state
            .links
            .iter()
            .find(|l| l.recipe_id == recipe_id && l.ingredient_id == ingredient_id)
            .cloned())
    }

    async fn add_ingredient(&self, link: NewRecipeIngredient) -> AppResult<RecipeIngredient> {
        let mut state = self.0.state();
        let link = RecipeIngredient {
            id: state.next_id(),
            recipe_id: link.recipe_id,
            ingredient_id: link.ingredient_id,
            quantity: link.quantity,
            unit: link.unit,
        };
        state.links.push(link.clone());
        Ok(link)
    }

    async fn update_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
        changes: UpdateRecipeIngredient,
    ) -> AppResult<Option<RecipeIngredient>> {
        let mut state = self.0.state();
        Ok(state
            .links
            .iter_mut()
            .find(|l| l.recipe_id == recipe_id && l.ingredient_id == ingredient_id)
            .map(|link| {
                if changes.quantity.is_some() {
                    link.quantity = changes.quantity;
                }
                if changes.unit.is_some() {
                    link.unit = changes.unit;
                }
                link.clone()
            }))
    }

    async fn remove_ingredient(
        &self,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> AppResult<Option<RecipeIngredient>> {
        let mut state = self.0.state();
        let position = state
            .links
            .iter()
            .position(|l| l.recipe_id == recipe_id && l.ingredient_id == ingredient_id);
        Ok(position.map(|index| state.links.remove(index)))
    }

    async fn ids_by_ingredient(&self, ingredient_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        let pairs: Vec<(i32, i32)> = state
            .links
            .iter()
            .map(|l| (l.recipe_id, l.ingredient_id))
            .collect();
        Ok(state.recipe_ids_where(&pairs, ingredient_id))
    }

    async fn link_ids_by_ingredient(&self, ingredient_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        Ok(state
            .links
            .iter()
            .filter(|l| l.ingredient_id == ingredient_id)
            .map(|l| l.id)
            .collect())
    }

    async fn ids_by_category(&self, category_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        Ok(state.recipe_ids_where(&state.recipe_categories, category_id))
    }

    async fn ids_by_category_tree(&self, category_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        let mut ids = state.recipe_ids_where(&state.recipe_categories, category_id);
        ids.extend(
            state
                .recipe_subcategories
                .iter()
                .filter(|(_, sid)| {
                    state
                        .subcategories
                        .get(sid)
                        .is_some_and(|s| s.category_id == category_id)
                })
                .map(|(rid, _)| *rid),
        );
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    async fn ids_by_subcategory(&self, subcategory_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        Ok(state.recipe_ids_where(&state.recipe_subcategories, subcategory_id))
    }

    async fn ids_by_nation(&self, nation_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        Ok(state
            .recipes
            .values()
            .filter(|r| r.nation_id == Some(nation_id))
            .map(|r| r.id)
            .collect())
    }

    async fn ids_by_region(&self, region_id: i32) -> AppResult<Vec<i32>> {
        let state = self.0.state();
        Ok(state
            .recipes
            .values()
            .filter(|r| {
                r.nation_id
                    .and_then(|nid| state.nations.get(&nid))
                    .is_some_and(|n| n.region_id == region_id)
            })
            .map(|r| r.id)
            .collect())
    }
}

#[async_trait]
impl IngredientRepo for Catalog {
    async fn create(&self, new_ingredient: NewIngredient) -> AppResult<Ingredient> {
        let mut state = self.state();
        let ingredient = Ingredient {
            id: state.next_id(),
            name: new_ingredient.name,
            description: new_ingredient.description,
        };
        state.ingredients.insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    async fn find_by_id(&self, ingredient_id: i32) -> AppResult<Option<Ingredient>> {
        Ok(self.state().ingredients.get(&ingredient_id).cloned())
    }

    async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Ingredient>, i64)> {
        Ok(page(&self.state().ingredients, offset, limit))
    }

    async fn update(
        &self,
        ingredient_id: i32,
        changes: UpdateIngredient,
    ) -> AppResult<Option<Ingredient>> {
        let mut state = self.state();
        Ok(state.ingredients.get_mut(&ingredient_id).map(|ingredient| {
            if let Some(name) = changes.name {
                ingredient.name = name;
            }
            if changes.description.is_some() {
                ingredient.description = changes.description;
            }
            ingredient.clone()
        }))
    }

    async fn delete(&self, ingredient_id: i32) -> AppResult<usize> {
        let mut state = self.state();
        if state.ingredients.remove(&ingredient_id).is_none() {
            return Ok(0);
        }
        state.links.retain(|l| l.ingredient_id != ingredient_id);
        Ok(1)
    }
}

#[async_trait]
impl CategoryRepo for Catalog {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut state = self.state();
        let category = Category {
            id: state.next_id(),
            name: new_category.name,
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, category_id: i32) -> AppResult<Option<Category>> {
        Ok(self.state().categories.get(&category_id).cloned())
    }

    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Category>, i64)> {
        Ok(page(&self.state().categories, offset, limit))
    }

    async fn rename(&self, category_id: i32, new_name: String) -> AppResult<Option<Category>> {
        let mut state = self.state();
        Ok(state.categories.get_mut(&category_id).map(|category| {
            category.name = new_name;
            category.clone()
        }))
    }

    async fn delete(&self, category_id: i32) -> AppResult<usize> {
        let mut state = self.state();
        if state.categories.remove(&category_id).is_none() {
            return Ok(0);
        }
        let orphaned: Vec<i32> = state
            .subcategories
            .values()
            .filter(|s| s.category_id == category_id)
            .map(|s| s.id)
            .collect();
        state.subcategories.retain(|_, s| s.category_id != category_id);
        state.recipe_categories.retain(|(_, cid)| *cid != category_id);
        state
            .recipe_subcategories
            .retain(|(_, sid)| !orphaned.contains(sid));
        Ok(1)
    }

    async fn create_subcategory(&self, new_subcategory: NewSubcategory) -> AppResult<Subcategory> {
        let mut state = self.state();
        let subcategory = Subcategory {
            id: state.next_id(),
            name: new_subcategory.name,
            category_id: new_subcategory.category_id,
        };
        state.subcategories.insert(subcategory.id, subcategory.clone());
        Ok(subcategory)
    }

    async fn find_subcategory(&self, subcategory_id: i32) -> AppResult<Option<Subcategory>> {
        Ok(self.state().subcategories.get(&subcategory_id).cloned())
    }

    async fn list_subcategories(&self, category_id: i32) -> AppResult<Vec<Subcategory>> {
        let state = self.state();
        Ok(state
            .subcategories
            .values()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn update_subcategory(
        &self,
        subcategory_id: i32,
        changes: UpdateSubcategory,
    ) -> AppResult<Option<Subcategory>> {
        let mut state = self.state();
        Ok(state.subcategories.get_mut(&subcategory_id).map(|subcategory| {
            if let Some(name) = changes.name {
                subcategory.name = name;
            }
            if let Some(category_id) = changes.category_id {
                subcategory.category_id = category_id;
            }
            subcategory.clone()
        }))
    }

    async fn delete_subcategory(&self, subcategory_id: i32) -> AppResult<usize> {
        let mut state = self.state();
        if state.subcategories.remove(&subcategory_id).is_none() {
            return Ok(0);
        }
        state
            .recipe_subcategories
            .retain(|(_, sid)| *sid != subcategory_id);
        Ok(1)
    }
}

#[async_trait]
impl DetailSource for RegionRows {
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
        let state = self.0.state();
        Ok(state.regions.get(&id).cloned().map(|region| {
            let nations = if include.contains(Association::Nations) {
                state
                    .nations
                    .values()
                    .filter(|n| n.region_id == id)
                    .cloned()
                    .collect()
            } else {
                Vec::new()
            };
            RegionGraph { region, nations }
        }))
    }

    fn assemble(&self, graph: RegionGraph) -> RegionDetail {
        RegionDetail::assemble(graph)
    }
}

#[async_trait]
impl RegionRepo for RegionRows {
    async fn create(&self, new_region: NewRegion) -> AppResult<Region> {
        let mut state = self.0.state();
        let region = Region {
            id: state.next_id(),
            name: new_region.name,
            description: new_region.description,
        };
        state.regions.insert(region.id, region.clone());
        Ok(region)
    }

    async fn find_by_id(&self, region_id: i32) -> AppResult<Option<Region>> {
        Ok(self.0.state().regions.get(&region_id).cloned())
    }

    async fn list_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<Region>, i64)> {
        Ok(page(&self.0.state().regions, offset, limit))
    }

    async fn update(&self, region_id: i32, changes: UpdateRegion) -> AppResult<Option<Region>> {
        let mut state = self.0.state();
        Ok(state.regions.get_mut(&region_id).map(|region| {
            if let Some(name) = changes.name {
                region.name = name;
            }
            if changes.description.is_some() {
                region.description = changes.description;
            }
            region.clone()
        }))
    }

    async fn delete(&self, region_id: i32) -> AppResult<usize> {
        let mut state = self.0.state();
        if state.nations.values().any(|n| n.region_id == region_id) {
            return Err(AppError::Validation {
                field: "region_id".to_string(),
                reason: "region still has nations".to_string(),
            });
        }
        Ok(usize::from(state.regions.remove(&region_id).is_some()))
    }

    async fn create_nation(&self, new_nation: NewNation) -> AppResult<Nation> {
        let mut state = self.0.state();
        let nation = Nation {
            id: state.next_id(),
            name: new_nation.name,
            region_id: new_nation.region_id,
        };
        state.nations.insert(nation.id, nation.clone());
        Ok(nation)
    }

    async fn find_nation(&self, nation_id: i32) -> AppResult<Option<Nation>> {
        Ok(self.0.state().nations.get(&nation_id).cloned())
    }

    async fn list_nations_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Nation>, i64)> {
        Ok(page(&self.0.state().nations, offset, limit))
    }

    async fn update_nation(
        &self,
        nation_id: i32,
        changes: UpdateNation,
    ) -> AppResult<Option<Nation>> {
        let mut state = self.0.state();
        Ok(state.nations.get_mut(&nation_id).map(|nation| {
            if let Some(name) = changes.name {
                nation.name = name;
            }
            if let Some(region_id) = changes.region_id {
                nation.region_id = region_id;
            }
            nation.clone()
        }))
    }

    async fn delete_nation(&self, nation_id: i32) -> AppResult<Option<Nation>> {
        let mut state = self.0.state();
        let removed = state.nations.remove(&nation_id);
        if removed.is_some() {
            for recipe in state.recipes.values_mut() {
                if recipe.nation_id == Some(nation_id) {
                    recipe.nation_id = None;
                }
            }
        }
        Ok(removed)
    }
}

/// Ids of the rows `seed` inserts.
pub(crate) struct Fixture {
    pub region: i32,
    pub other_region: i32,
    pub nation: i32,
    pub ingredient: i32,
    /// The `linked_recipe` to `ingredient` link
    pub link: i32,
    pub category: i32,
    pub subcategory: i32,
    /// From `nation`, uses `ingredient`, filed under `category` and `subcategory`
    pub linked_recipe: i32,
    /// Shares nothing with the rows above
    pub plain_recipe: i32,
}

fn insert_recipe(state: &mut CatalogState, name: &str, nation_id: Option<i32>) -> i32 {
    let id = state.next_id();
    state.recipes.insert(
        id,
        Recipe {
            id,
            name: name.to_string(),
            description: None,
            nation_id,
            prep_minutes: None,
            cook_minutes: None,
            servings: None,
        },
    );
    id
}

pub(crate) fn seed(catalog: &Catalog) -> Fixture {
    let mut state = catalog.state();

    let region = state.next_id();
    state.regions.insert(
        region,
        Region {
            id: region,
            name: "Mediterranean".to_string(),
            description: None,
        },
    );
    let other_region = state.next_id();
    state.regions.insert(
        other_region,
        Region {
            id: other_region,
            name: "Balkans".to_string(),
            description: None,
        },
    );
    let nation = state.next_id();
    state.nations.insert(
        nation,
        Nation {
            id: nation,
            name: "Greece".to_string(),
            region_id: region,
        },
    );
    let ingredient = state.next_id();
    state.ingredients.insert(
        ingredient,
        Ingredient {
            id: ingredient,
            name: "Feta".to_string(),
            description: None,
        },
    );
    let category = state.next_id();
    state.categories.insert(
        category,
        Category {
            id: category,
            name: "Salads".to_string(),
        },
    );
    let subcategory = state.next_id();
    state.subcategories.insert(
        subcategory,
        Subcategory {
            id: subcategory,
            name: "Cold".to_string(),
            category_id: category,
        },
    );

    let linked_recipe = insert_recipe(&mut *state, "Horiatiki", Some(nation));
    let plain_recipe = insert_recipe(&mut *state, "Toast", None);

    let link = state.next_id();
    state.links.push(RecipeIngredient {
        id: link,
        recipe_id: linked_recipe,
        ingredient_id: ingredient,
        quantity: Some("200".to_string()),
        unit: Some("g".to_string()),
    });
    state.recipe_categories.push((linked_recipe, category));
    state.recipe_subcategories.push((linked_recipe, subcategory));

    Fixture {
        region,
        other_region,
        nation,
        ingredient,
        link,
        category,
        subcategory,
        linked_recipe,
        plain_recipe,
    }
}

/// Loads both recipe detail views so they sit in the cache.
pub(crate) async fn warm_recipe_details(services: &Services, caches: &EntityCaches, fx: &Fixture) {
    for id in [fx.linked_recipe, fx.plain_recipe] {
        services.recipes.get_recipe_details(id, None).await.unwrap();
        assert!(caches.recipe_detail.get_cache(id).await.is_some());
    }
}

/// Loads both region detail views so they sit in the cache.
pub(crate) async fn warm_region_details(services: &Services, caches: &EntityCaches, fx: &Fixture) {
    for id in [fx.region, fx.other_region] {
        services.regions.get_region_details(id, None).await.unwrap();
        assert!(caches.region_detail.get_cache(id).await.is_some());
    }
}
