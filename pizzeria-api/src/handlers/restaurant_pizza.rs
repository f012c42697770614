use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use pizzeria_catalog::{assignment::NewAssignment, service};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::models::*;

use super::{AppState, with_connection};

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza assigned to restaurant", body = RestaurantPizza),
        (status = 400, description = "Missing field, non-integer value or price out of range", body = ValidationErrorResponse),
        (status = 404, description = "Pizza or restaurant not found", body = ApiErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, payload))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizza>), ApiError> {
    let body = payload
        .inspect_err(|rejection| debug!(%rejection, "unreadable restaurant pizza body"))
        .ok()
        .map(|Json(body)| body);
    let assignment = NewAssignment::from_json(body.as_ref())?;

    let created = with_connection(&state, move |conn| {
        service::create_restaurant_pizza(conn, assignment)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
