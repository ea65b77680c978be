//! Child rows owned by a recipe. All of them cascade on recipe delete.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Recipe;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::instructions)]
#[diesel(belongs_to(Recipe))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Instruction {
    pub id: i32,
    pub recipe_id: i32,
    pub step: i32,
    pub body: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::instructions)]
pub struct NewInstruction {
    pub recipe_id: i32,
    pub step: i32,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::aliases)]
#[diesel(belongs_to(Recipe))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Alias {
    pub id: i32,
    pub recipe_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::aliases)]
pub struct NewAlias {
    pub recipe_id: i32,
    pub name: String,
}

/// Cached under the `RecipeImage` kind
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::recipe_images)]
#[diesel(belongs_to(Recipe))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeImage {
    pub id: i32,
    pub recipe_id: i32,
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::recipe_images)]
pub struct NewRecipeImage {
    pub recipe_id: i32,
    pub url: String,
    pub caption: Option<String>,
}

/// Link between a recipe and an ingredient, cached under `RecipeIngredient`
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(belongs_to(Recipe))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeIngredient {
    pub id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct UpdateRecipeIngredient {
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl UpdateRecipeIngredient {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.unit.is_none()
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::recipe_categories)]
pub struct RecipeCategoryLink {
    pub recipe_id: i32,
    pub category_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::recipe_subcategories)]
pub struct RecipeSubcategoryLink {
    pub recipe_id: i32,
    pub subcategory_id: i32,
}
