mod category;
mod detail;
mod include;
mod ingredient;
mod recipe;
mod recipe_parts;
mod region;

pub use category::{Category, NewCategory, NewSubcategory, Subcategory, UpdateSubcategory};
pub use detail::{
    ImageView, IngredientLine, NationSummary, RecipeDetail, RecipeGraph, RegionDetail,
    RegionGraph,
};
pub use include::{Association, IncludeSpec};
pub use ingredient::{Ingredient, NewIngredient, UpdateIngredient};
pub use recipe::{NewRecipe, Recipe, UpdateRecipe};
pub use recipe_parts::{
    Alias, Instruction, NewAlias, NewInstruction, NewRecipeImage, NewRecipeIngredient,
    RecipeCategoryLink, RecipeImage, RecipeIngredient, RecipeSubcategoryLink,
    UpdateRecipeIngredient,
};
pub use region::{Nation, NewNation, NewRegion, Region, UpdateNation, UpdateRegion};
