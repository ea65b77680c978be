use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::subcategories)]
#[diesel(belongs_to(Category))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Subcategory {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubcategory {
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct UpdateSubcategory {
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

impl UpdateSubcategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category_id.is_none()
    }
}
