//! HTTP request handlers, one module per resource.

pub mod categories;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod regions;
