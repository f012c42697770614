//! Request-side validation for assigning a pizza to a restaurant.
//!
//! Checks run in a fixed order: every field present, every field an
//! integer, price in range. Existence of the referenced rows is checked
//! later, inside the unit of work.

use serde_json::{Map, Value};

use crate::error::CatalogError;
use crate::models::Price;

const FIELDS: [&str; 3] = ["pizza_id", "restaurant_id", "price"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAssignment {
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub price: Price,
}

impl NewAssignment {
    /// `None` stands for a missing or unreadable request body.
    pub fn from_json(body: Option<&Value>) -> Result<Self, CatalogError> {
        let fields = body.and_then(Value::as_object);
        let fields = check_presence(fields)?;

        let pizza_id = coerce_id(fields, "pizza_id");
        let restaurant_id = coerce_id(fields, "restaurant_id");
        let price = coerce_integer(&fields["price"])
            .ok_or_else(|| not_an_integer("price"));

        let errors: Vec<String> = [&pizza_id, &restaurant_id]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
            .chain(price.as_ref().err())
            .cloned()
            .collect();
        if !errors.is_empty() {
            return Err(CatalogError::Validation(errors));
        }

        Ok(NewAssignment {
            pizza_id: pizza_id.map_err(CatalogError::validation)?,
            restaurant_id: restaurant_id.map_err(CatalogError::validation)?,
            price: Price::new(price.map_err(CatalogError::validation)?)?,
        })
    }
}

fn check_presence(fields: Option<&Map<String, Value>>) -> Result<&Map<String, Value>, CatalogError> {
    let missing: Vec<&str> = FIELDS
        .into_iter()
        .filter(|f| !fields.is_some_and(|m| m.contains_key(*f)))
        .collect();

    match fields {
        Some(fields) if missing.is_empty() => Ok(fields),
        _ => Err(CatalogError::validation(format!(
            "Validation failed. Missing {} in request.",
            missing.join(", ")
        ))),
    }
}

fn coerce_id(fields: &Map<String, Value>, field: &str) -> Result<i64, String> {
    coerce_integer(&fields[field]).ok_or_else(|| not_an_integer(field))
}

fn not_an_integer(field: &str) -> String {
    format!("{field} must be an integer")
}

/// Integers pass through; strings holding an integer are parsed.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
