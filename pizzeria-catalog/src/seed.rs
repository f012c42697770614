use diesel::prelude::*;
use tracing::info;

use crate::error::CatalogError;
use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza, Price};
use crate::repository::Catalog;

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const RESTAURANT_PIZZAS: [(usize, usize, i64); 4] = [(0, 0, 1), (1, 1, 4), (2, 2, 5), (0, 2, 12)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces the whole catalog with a small fixed data set.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, CatalogError> {
    conn.immediate_transaction::<_, CatalogError, _>(|conn| {
        let mut catalog = Catalog::new(conn);
        catalog.clear()?;

        let restaurants = RESTAURANTS
            .iter()
            .map(|&(name, address)| catalog.insert_restaurant(&NewRestaurant { name, address }))
            .collect::<QueryResult<Vec<_>>>()?;
        let pizzas = PIZZAS
            .iter()
            .map(|&(name, ingredients)| catalog.insert_pizza(&NewPizza { name, ingredients }))
            .collect::<QueryResult<Vec<_>>>()?;

        for (restaurant, pizza, price) in RESTAURANT_PIZZAS {
            catalog.insert_restaurant_pizza(&NewRestaurantPizza::new(
                restaurants[restaurant].id,
                pizzas[pizza].id,
                Price::new(price)?,
            ))?;
        }

        let summary = SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas: RESTAURANT_PIZZAS.len(),
        };
        info!(?summary, "catalog seeded");
        Ok(summary)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{service, test_connection};

    #[test]
    fn test_seed_replaces_catalog() {
        let conn = &mut test_connection();
        seed(conn).unwrap();
        let summary = seed(conn).unwrap();

        assert_eq!(summary.restaurants, 3);
        let restaurants = service::list_restaurants(conn).unwrap();
        assert_eq!(restaurants.len(), 3);
        assert_eq!(service::list_pizzas(conn).unwrap().len(), 3);

        let detail = service::get_restaurant(conn, restaurants[0].id).unwrap();
        assert_eq!(detail.restaurant_pizzas.len(), 2);
    }
}
