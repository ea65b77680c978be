//! Router configuration for the API.

use axum::{Json, Router, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. Request ID: generates or propagates `x-request-id` and scopes it
/// 2. Logging: one span and completion line per request
/// 3. Error handler: turns plain-text error responses into `ErrorResponse`
///
/// CORS and compression wrap all of the above.
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/recipes", handlers::recipes::recipe_routes())
        .nest("/api/ingredients", handlers::ingredients::ingredient_routes())
        .nest("/api/categories", handlers::categories::category_routes())
        .nest("/api/subcategories", handlers::categories::subcategory_routes())
        .nest("/api/regions", handlers::regions::region_routes())
        .nest("/api/nations", handlers::regions::nation_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .route(OPENAPI_PATH, get(move || async move { Json(api) }))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .with_state(state)
}
