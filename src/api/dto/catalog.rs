//! Request DTOs for the reference entities recipes point at.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    NewIngredient, NewNation, NewRegion, UpdateIngredient, UpdateNation, UpdateRegion,
    UpdateSubcategory,
};

// ============================================================================
// Ingredients
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Tamarind paste")]
    pub name: String,
    pub description: Option<String>,
}

impl CreateIngredientRequest {
    pub fn into_new_ingredient(self) -> NewIngredient {
        NewIngredient {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateIngredientRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateIngredientRequest {
    pub fn into_update_ingredient(self) -> UpdateIngredient {
        UpdateIngredient {
            name: self.name,
            description: self.description,
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Body for creating or renaming a category or subcategory.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct NameRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Noodles")]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateSubcategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    /// Moves the subcategory under another category
    pub category_id: Option<i32>,
}

impl UpdateSubcategoryRequest {
    pub fn into_update_subcategory(self) -> UpdateSubcategory {
        UpdateSubcategory {
            name: self.name,
            category_id: self.category_id,
        }
    }
}

// ============================================================================
// Regions and nations
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRegionRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Southeast Asia")]
    pub name: String,
    pub description: Option<String>,
}

impl CreateRegionRequest {
    pub fn into_new_region(self) -> NewRegion {
        NewRegion {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRegionRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateRegionRequest {
    pub fn into_update_region(self) -> UpdateRegion {
        UpdateRegion {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateNationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Thailand")]
    pub name: String,
    #[validate(range(min = 1, message = "Region id must be positive"))]
    pub region_id: i32,
}

impl CreateNationRequest {
    pub fn into_new_nation(self) -> NewNation {
        NewNation {
            name: self.name,
            region_id: self.region_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateNationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "Region id must be positive"))]
    pub region_id: Option<i32>,
}

impl UpdateNationRequest {
    pub fn into_update_nation(self) -> UpdateNation {
        UpdateNation {
            name: self.name,
            region_id: self.region_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let request = NameRequest {
            name: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_partial_update_skips_absent_fields() {
        let request: UpdateNationRequest = serde_json::from_str(r#"{"region_id": 4}"#).unwrap();
        assert!(request.validate().is_ok());

        let update = request.into_update_nation();
        assert_eq!(update.name, None);
        assert_eq!(update.region_id, Some(4));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_empty_update_is_empty() {
        let request: UpdateIngredientRequest = serde_json::from_str("{}").unwrap();
        assert!(request.into_update_ingredient().is_empty());
    }
}
