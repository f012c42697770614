//! Response bodies and the mappings that build them from catalog rows.
//! Nesting stops one level below the root: an embedded pizza or restaurant
//! never carries its own associations.

use pizzeria_catalog::{models as catalog, service};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Restaurant {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Pizza {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Comma separated list of ingredients
    pub ingredients: String,
    /// Name of the pizza
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantMenuEntry {
    /// Identifier of the restaurant pizza association
    pub id: i32,
    /// Price charged by the restaurant, 1 to 30
    pub price: i32,
    pub pizza: Pizza,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantMenuEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PizzaOffer {
    /// Identifier of the restaurant pizza association
    pub id: i32,
    pub price: i32,
    pub restaurant: Restaurant,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PizzaDetail {
    pub id: i32,
    pub ingredients: String,
    pub name: String,
    pub restaurant_pizzas: Vec<PizzaOffer>,
}

/// Request body for `POST /restaurant_pizzas`. Ids and price may also be
/// sent as strings holding an integer.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    pub pizza_id: i32,
    pub restaurant_id: i32,
    /// Price between 1 and 30 inclusive
    pub price: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RestaurantPizza {
    pub id: i32,
    pub pizza: Pizza,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant: Restaurant,
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// One message per failed check
    pub errors: Vec<String>,
}

impl From<&catalog::Restaurant> for Restaurant {
    fn from(restaurant: &catalog::Restaurant) -> Self {
        Restaurant {
            id: restaurant.id,
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
        }
    }
}

impl From<&catalog::Pizza> for Pizza {
    fn from(pizza: &catalog::Pizza) -> Self {
        Pizza {
            id: pizza.id,
            ingredients: pizza.ingredients.clone(),
            name: pizza.name.clone(),
        }
    }
}

impl From<service::RestaurantDetail> for RestaurantDetail {
    fn from(detail: service::RestaurantDetail) -> Self {
        let service::RestaurantDetail {
            restaurant,
            restaurant_pizzas,
        } = detail;

        RestaurantDetail {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas: restaurant_pizzas
                .iter()
                .map(|(rp, pizza)| RestaurantMenuEntry {
                    id: rp.id,
                    price: rp.price,
                    pizza: pizza.into(),
                })
                .collect(),
        }
    }
}

impl From<service::PizzaDetail> for PizzaDetail {
    fn from(detail: service::PizzaDetail) -> Self {
        let service::PizzaDetail {
            pizza,
            restaurant_pizzas,
        } = detail;

        PizzaDetail {
            id: pizza.id,
            ingredients: pizza.ingredients,
            name: pizza.name,
            restaurant_pizzas: restaurant_pizzas
                .iter()
                .map(|(rp, restaurant)| PizzaOffer {
                    id: rp.id,
                    price: rp.price,
                    restaurant: restaurant.into(),
                })
                .collect(),
        }
    }
}

impl From<service::Assignment> for RestaurantPizza {
    fn from(assignment: service::Assignment) -> Self {
        let rp = &assignment.restaurant_pizza;

        RestaurantPizza {
            id: rp.id,
            pizza: (&assignment.pizza).into(),
            pizza_id: rp.pizza_id,
            price: rp.price,
            restaurant: (&assignment.restaurant).into(),
            restaurant_id: rp.restaurant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn restaurant() -> catalog::Restaurant {
        catalog::Restaurant {
            id: 1,
            name: "Kiki's Pizza".to_string(),
            address: "address3".to_string(),
        }
    }

    fn pizza() -> catalog::Pizza {
        catalog::Pizza {
            id: 2,
            name: "Geri".to_string(),
            ingredients: "Dough, Tomato Sauce, Cheese, Pepperoni".to_string(),
        }
    }

    fn restaurant_pizza() -> catalog::RestaurantPizza {
        catalog::RestaurantPizza {
            id: 9,
            price: 15,
            restaurant_id: 1,
            pizza_id: 2,
        }
    }

    #[test]
    fn test_restaurant_detail_embeds_pizza_only() {
        let detail = RestaurantDetail::from(service::RestaurantDetail {
            restaurant: restaurant(),
            restaurant_pizzas: vec![(restaurant_pizza(), pizza())],
        });

        assert_eq!(
            serde_json::to_value(detail).unwrap(),
            json!({
                "id": 1,
                "name": "Kiki's Pizza",
                "address": "address3",
                "restaurant_pizzas": [{
                    "id": 9,
                    "price": 15,
                    "pizza": {
                        "id": 2,
                        "name": "Geri",
                        "ingredients": "Dough, Tomato Sauce, Cheese, Pepperoni"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_pizza_detail_embeds_restaurant_only() {
        let detail = PizzaDetail::from(service::PizzaDetail {
            pizza: pizza(),
            restaurant_pizzas: vec![(restaurant_pizza(), restaurant())],
        });

        let value = serde_json::to_value(detail).unwrap();
        assert_eq!(
            value["restaurant_pizzas"][0]["restaurant"],
            json!({"id": 1, "name": "Kiki's Pizza", "address": "address3"})
        );
        assert!(value["restaurant_pizzas"][0].get("pizza").is_none());
    }

    #[test]
    fn test_restaurant_pizza_carries_foreign_keys() {
        let body = RestaurantPizza::from(service::Assignment {
            restaurant_pizza: restaurant_pizza(),
            pizza: pizza(),
            restaurant: restaurant(),
        });

        assert_eq!(body.pizza_id, 2);
        assert_eq!(body.restaurant_id, 1);
        assert_eq!(body.price, 15);
        assert_eq!(body.pizza.name, "Geri");
        assert_eq!(body.restaurant.name, "Kiki's Pizza");
    }
}
