use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct UpdateIngredient {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateIngredient {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
