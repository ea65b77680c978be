//! Denormalized detail views and the relational graphs they are built from.
//!
//! A graph holds whatever rows the include spec asked for; assembly
//! flattens it into the view that is returned to clients and cached under
//! the `recipeDetail` / `regionDetail` kinds.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    Alias, Category, Ingredient, Instruction, Nation, Recipe, RecipeImage, RecipeIngredient,
    Region, Subcategory,
};

/// Rows loaded for one recipe. Associations left out of the include spec stay empty.
#[derive(Debug, Clone)]
pub struct RecipeGraph {
    pub recipe: Recipe,
    pub nation: Option<Nation>,
    pub region: Option<Region>,
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub instructions: Vec<Instruction>,
    pub aliases: Vec<Alias>,
    pub images: Vec<RecipeImage>,
    pub ingredients: Vec<(RecipeIngredient, Ingredient)>,
}

impl RecipeGraph {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            nation: None,
            region: None,
            categories: Vec::new(),
            subcategories: Vec::new(),
            instructions: Vec::new(),
            aliases: Vec::new(),
            images: Vec::new(),
            ingredients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageView {
    pub id: i32,
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientLine {
    /// Ingredient id, not the link row id
    pub id: i32,
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub subcategories: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Instruction bodies ordered by step
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageView>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl RecipeDetail {
    pub fn assemble(graph: RecipeGraph) -> Self {
        let RecipeGraph {
            recipe,
            nation,
            region,
            categories,
            subcategories,
            mut instructions,
            aliases,
            images,
            ingredients,
        } = graph;

        // Row order from the store is not guaranteed
        instructions.sort_by_key(|i| i.step);

        Self {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            prep_minutes: recipe.prep_minutes,
            cook_minutes: recipe.cook_minutes,
            servings: recipe.servings,
            nation: nation.map(|n| n.name),
            region: region.map(|r| r.name),
            categories: categories.into_iter().map(|c| c.name).collect(),
            subcategories: subcategories.into_iter().map(|s| s.name).collect(),
            aliases: aliases.into_iter().map(|a| a.name).collect(),
            instructions: instructions.into_iter().map(|i| i.body).collect(),
            images: images
                .into_iter()
                .map(|img| ImageView {
                    id: img.id,
                    url: img.url,
                    caption: img.caption,
                })
                .collect(),
            ingredients: ingredients
                .into_iter()
                .map(|(link, ingredient)| IngredientLine {
                    id: ingredient.id,
                    name: ingredient.name,
                    quantity: link.quantity,
                    unit: link.unit,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegionGraph {
    pub region: Region,
    pub nations: Vec<Nation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NationSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegionDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Ordered by name
    #[serde(default)]
    pub nations: Vec<NationSummary>,
}

impl RegionDetail {
    pub fn assemble(graph: RegionGraph) -> Self {
        let mut nations: Vec<NationSummary> = graph
            .nations
            .into_iter()
            .map(|n| NationSummary {
                id: n.id,
                name: n.name,
            })
            .collect();
        nations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Self {
            id: graph.region.id,
            name: graph.region.name,
            description: graph.region.description,
            nations,
        }
    }
}
