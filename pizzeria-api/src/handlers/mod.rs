pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{Router, response::Html, routing::get};
use pizzeria_catalog::{CatalogError, DbPool, SqliteConnection};
use utoipa::OpenApi;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

pub fn index_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// Runs one catalog operation on a pooled connection off the async runtime.
async fn with_connection<T, F>(state: &AppState, operation: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || -> Result<T, CatalogError> {
        let mut conn = pool.get()?;
        operation(&mut *conn)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Blocking task failed: {e}")))?
    .map_err(ApiError::from)
}

/// Ids that are not integers can never match a row.
fn parse_id(raw: &str, not_found: CatalogError) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::from(not_found))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        pizza::get_pizza,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::models::Restaurant,
            crate::models::RestaurantDetail,
            crate::models::RestaurantMenuEntry,
            crate::models::Pizza,
            crate::models::PizzaDetail,
            crate::models::PizzaOffer,
            crate::models::CreateRestaurantPizzaRequest,
            crate::models::RestaurantPizza,
            crate::models::ApiErrorResponse,
            crate::models::ValidationErrorResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant catalog endpoints"),
        (name = "pizzas", description = "Pizza catalog endpoints"),
        (name = "restaurant_pizzas", description = "Pizza pricing per restaurant")
    ),
    info(
        title = "Pizzeria API",
        description = "Restaurants, pizzas and what each restaurant charges for them",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
