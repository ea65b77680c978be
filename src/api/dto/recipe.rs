//! Recipe request DTOs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::models::{IncludeSpec, NewRecipe, UpdateRecipe, UpdateRecipeIngredient};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Pad Thai")]
    pub name: String,
    pub description: Option<String>,
    pub nation_id: Option<i32>,
    #[validate(range(min = 0, message = "Prep time cannot be negative"))]
    pub prep_minutes: Option<i32>,
    #[validate(range(min = 0, message = "Cook time cannot be negative"))]
    pub cook_minutes: Option<i32>,
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: Option<i32>,
}

impl CreateRecipeRequest {
    pub fn into_new_recipe(self) -> NewRecipe {
        NewRecipe {
            name: self.name,
            description: self.description,
            nation_id: self.nation_id,
            prep_minutes: self.prep_minutes,
            cook_minutes: self.cook_minutes,
            servings: self.servings,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub nation_id: Option<i32>,
    #[validate(range(min = 0, message = "Prep time cannot be negative"))]
    pub prep_minutes: Option<i32>,
    #[validate(range(min = 0, message = "Cook time cannot be negative"))]
    pub cook_minutes: Option<i32>,
    #[validate(range(min = 1, message = "Servings must be at least 1"))]
    pub servings: Option<i32>,
}

impl UpdateRecipeRequest {
    pub fn into_update_recipe(self) -> UpdateRecipe {
        UpdateRecipe {
            name: self.name,
            description: self.description,
            nation_id: self.nation_id,
            prep_minutes: self.prep_minutes,
            cook_minutes: self.cook_minutes,
            servings: self.servings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstructionInput {
    #[schema(example = 1, minimum = 1)]
    pub step: i32,
    #[schema(example = "Soak the noodles for 20 minutes.")]
    pub body: String,
}

/// Full replacement of a recipe's instructions.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReplaceInstructionsRequest {
    #[validate(custom(function = "validate_instructions"))]
    pub instructions: Vec<InstructionInput>,
}

impl ReplaceInstructionsRequest {
    pub fn into_steps(self) -> Vec<(i32, String)> {
        self.instructions
            .into_iter()
            .map(|i| (i.step, i.body))
            .collect()
    }
}

fn validate_instructions(instructions: &[InstructionInput]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for instruction in instructions {
        if instruction.step < 1 {
            return Err(ValidationError::new("step_range").with_message("Steps start at 1".into()));
        }
        if instruction.body.trim().is_empty() {
            return Err(
                ValidationError::new("empty_body").with_message("Instruction body is required".into())
            );
        }
        if !seen.insert(instruction.step) {
            return Err(ValidationError::new("duplicate_step")
                .with_message(format!("Step {} appears more than once", instruction.step).into()));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReplaceAliasesRequest {
    #[validate(custom(function = "validate_aliases"))]
    #[schema(example = json!(["Phat Thai"]))]
    pub aliases: Vec<String>,
}

fn validate_aliases(aliases: &[String]) -> Result<(), ValidationError> {
    if aliases
        .iter()
        .any(|a| a.trim().is_empty() || a.chars().count() > 255)
    {
        return Err(ValidationError::new("alias_length")
            .with_message("Aliases must be between 1 and 255 characters".into()));
    }
    Ok(())
}

/// Replacement set of category or subcategory ids.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReplaceLinksRequest {
    #[validate(length(max = 100, message = "At most 100 links"))]
    #[schema(example = json!([1, 4]))]
    pub ids: Vec<i32>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateImageRequest {
    #[validate(url(message = "Image URL must be a valid URL"))]
    #[schema(example = "https://images.example.com/pad-thai.jpg")]
    pub url: String,
    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    pub caption: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddIngredientRequest {
    #[validate(range(min = 1, message = "Ingredient id must be positive"))]
    pub ingredient_id: i32,
    #[validate(length(max = 64, message = "Quantity must be at most 64 characters"))]
    #[schema(example = "200")]
    pub quantity: Option<String>,
    #[validate(length(max = 64, message = "Unit must be at most 64 characters"))]
    #[schema(example = "g")]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRecipeIngredientRequest {
    #[validate(length(max = 64, message = "Quantity must be at most 64 characters"))]
    pub quantity: Option<String>,
    #[validate(length(max = 64, message = "Unit must be at most 64 characters"))]
    pub unit: Option<String>,
}

impl UpdateRecipeIngredientRequest {
    pub fn into_update(self) -> UpdateRecipeIngredient {
        UpdateRecipeIngredient {
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}

/// `?include=` selector for detail endpoints.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct DetailsQuery {
    /// Comma-separated associations; omitted or empty means the full cached view
    #[param(example = "nation,instructions")]
    pub include: Option<String>,
}

impl DetailsQuery {
    /// `None` when no association is named.
    pub fn include_spec(&self) -> AppResult<Option<IncludeSpec>> {
        let spec = self
            .include
            .as_deref()
            .map(str::parse::<IncludeSpec>)
            .transpose()?;
        Ok(spec.filter(|spec| !spec.is_empty()))
    }
}
