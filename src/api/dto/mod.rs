//! Data Transfer Objects for API requests and responses.
//!
//! Response bodies are mostly the models themselves; DTOs here cover
//! validated request bodies, query strings and the error envelope.

mod catalog;
mod error;
mod health;
mod pagination;
mod recipe;

pub use catalog::{
    CreateIngredientRequest, CreateNationRequest, CreateRegionRequest, NameRequest,
    UpdateIngredientRequest, UpdateNationRequest, UpdateRegionRequest, UpdateSubcategoryRequest,
};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{PagedResponse, PaginationMeta, PaginationParams};
pub use recipe::{
    AddIngredientRequest, CreateImageRequest, CreateRecipeRequest, DetailsQuery,
    InstructionInput, ReplaceAliasesRequest, ReplaceInstructionsRequest, ReplaceLinksRequest,
    UpdateRecipeIngredientRequest, UpdateRecipeRequest,
};
