//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for pagination.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: u32,

    /// Number of items per page (max 100)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub page_size: u32,
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Generic paged response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    /// The data items for this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    #[schema(example = 1)]
    pub page: u32,

    #[schema(example = 20)]
    pub page_size: u32,

    /// Total number of items across all pages
    #[schema(example = 100)]
    pub total_items: u64,

    #[schema(example = 5)]
    pub total_pages: u32,

    #[schema(example = true)]
    pub has_next: bool,

    #[schema(example = false)]
    pub has_prev: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: u64) -> Self {
        let page_size = u64::from(params.page_size.max(1));
        let total_pages = total_items.div_ceil(page_size) as u32;

        Self {
            data,
            pagination: PaginationMeta {
                page: params.page,
                page_size: params.page_size,
                total_items,
                total_pages,
                has_next: params.page < total_pages,
                has_prev: params.page > 1,
            },
        }
    }
}
