use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flat recipe row, cached under the `recipe` kind
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub nation_id: Option<i32>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub nation_id: Option<i32>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct UpdateRecipe {
    pub name: Option<String>,
    pub description: Option<String>,
    pub nation_id: Option<i32>,
    pub prep_minutes: Option<i32>,
    pub cook_minutes: Option<i32>,
    pub servings: Option<i32>,
}

impl UpdateRecipe {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.nation_id.is_none()
            && self.prep_minutes.is_none()
            && self.cook_minutes.is_none()
            && self.servings.is_none()
    }
}
