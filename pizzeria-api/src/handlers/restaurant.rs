use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use pizzeria_catalog::{CatalogError, service};
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, parse_id, with_connection};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [Restaurant]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = with_connection(&state, service::list_restaurants).await?;

    Ok(Json(restaurants.iter().map(Restaurant::from).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    responses(
        (status = 200, description = "Restaurant with the pizzas it serves", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let restaurant_id = parse_id(&id, CatalogError::RestaurantNotFound)?;
    let detail = with_connection(&state, move |conn| {
        service::get_restaurant(conn, restaurant_id)
    })
    .await?;

    Ok(Json(detail.into()))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = parse_id(&id, CatalogError::RestaurantNotFound)?;
    with_connection(&state, move |conn| {
        service::delete_restaurant(conn, restaurant_id)
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
