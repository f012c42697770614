use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use handlers::{
    ApiDoc, AppState, index_router, pizza_router, restaurant_pizza_router, restaurant_router,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(index_router())
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
