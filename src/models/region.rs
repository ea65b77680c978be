use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::regions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Region {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::regions)]
pub struct NewRegion {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::regions)]
pub struct UpdateRegion {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateRegion {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::schema::nations)]
#[diesel(belongs_to(Region))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Nation {
    pub id: i32,
    pub name: String,
    pub region_id: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::nations)]
pub struct NewNation {
    pub name: String,
    pub region_id: i32,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::nations)]
pub struct UpdateNation {
    pub name: Option<String>,
    pub region_id: Option<i32>,
}

impl UpdateNation {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.region_id.is_none()
    }
}
