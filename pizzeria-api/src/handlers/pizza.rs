use axum::{
    Router,
    extract::{Path, State},
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
        .route("/pizzas", get(list_pizzas))
        .route("/pizzas/{id}", get(get_pizza))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [Pizza]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, ApiError> {
    let pizzas = with_connection(&state, service::list_pizzas).await?;

    Ok(Json(pizzas.iter().map(Pizza::from).collect()))
}

#[utoipa::path(
    get,
    path = "/pizzas/{id}",
    params(
        ("id" = i32, Path, description = "Pizza id")
    ),
    responses(
        (status = 200, description = "Pizza with the restaurants serving it", body = PizzaDetail),
        (status = 404, description = "Pizza not found", body = ApiErrorResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn get_pizza(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PizzaDetail>, ApiError> {
    let pizza_id = parse_id(&id, CatalogError::PizzaNotFound)?;
    let detail = with_connection(&state, move |conn| service::get_pizza(conn, pizza_id)).await?;

    Ok(Json(detail.into()))
}
