//! Catalog operations. Each call runs as one transaction over the given
//! connection: committed when it returns `Ok`, rolled back otherwise.
//! Writes take the write lock up front (`BEGIN IMMEDIATE`) so concurrent
//! writers wait on the busy timeout instead of failing a lock upgrade.

use diesel::prelude::*;
use tracing::{debug, info};

use crate::assignment::NewAssignment;
use crate::error::CatalogError;
use crate::models::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use crate::repository::Catalog;

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub restaurant_pizzas: Vec<(RestaurantPizza, Pizza)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PizzaDetail {
    pub pizza: Pizza,
    pub restaurant_pizzas: Vec<(RestaurantPizza, Restaurant)>,
}

/// A freshly created association together with both rows it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub restaurant_pizza: RestaurantPizza,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

pub fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<Restaurant>, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|conn| Ok(Catalog::new(conn).restaurants()?))
}

pub fn get_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<RestaurantDetail, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|conn| {
        let mut catalog = Catalog::new(conn);
        let restaurant = catalog.find_restaurant(restaurant_id)?.ok_or_else(|| {
            debug!(restaurant_id, "restaurant not found");
            CatalogError::RestaurantNotFound
        })?;
        let restaurant_pizzas = catalog.restaurant_pizzas_of_restaurant(&restaurant)?;

        Ok(RestaurantDetail {
            restaurant,
            restaurant_pizzas,
        })
    })
}

pub fn delete_restaurant(conn: &mut SqliteConnection, restaurant_id: i32) -> Result<(), CatalogError> {
    conn.immediate_transaction::<_, CatalogError, _>(|conn| {
        let mut catalog = Catalog::new(conn);
        let restaurant = catalog
            .find_restaurant(restaurant_id)?
            .ok_or(CatalogError::RestaurantNotFound)?;
        let removed = catalog.delete_restaurant(&restaurant)?;

        info!(restaurant_id, removed_restaurant_pizzas = removed, "restaurant deleted");
        Ok(())
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<Pizza>, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|conn| Ok(Catalog::new(conn).pizzas()?))
}

pub fn get_pizza(conn: &mut SqliteConnection, pizza_id: i32) -> Result<PizzaDetail, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|conn| {
        let mut catalog = Catalog::new(conn);
        let pizza = catalog.find_pizza(pizza_id)?.ok_or_else(|| {
            debug!(pizza_id, "pizza not found");
            CatalogError::PizzaNotFound
        })?;
        let restaurant_pizzas = catalog.restaurant_pizzas_of_pizza(&pizza)?;

        Ok(PizzaDetail {
            pizza,
            restaurant_pizzas,
        })
    })
}

/// Assigns a pizza to a restaurant at a price.
///
/// The payload has already passed presence, integer and price checks by the
/// time it is a [`NewAssignment`]; this adds the existence check.
pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    assignment: NewAssignment,
) -> Result<Assignment, CatalogError> {
    conn.immediate_transaction::<_, CatalogError, _>(|conn| {
        let mut catalog = Catalog::new(conn);
        // Ids outside the column range cannot match a row.
        let pizza = match i32::try_from(assignment.pizza_id) {
            Ok(pizza_id) => catalog.find_pizza(pizza_id)?,
            Err(_) => None,
        };
        let restaurant = match i32::try_from(assignment.restaurant_id) {
            Ok(restaurant_id) => catalog.find_restaurant(restaurant_id)?,
            Err(_) => None,
        };
        let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
            debug!(?assignment, "assignment target not found");
            return Err(CatalogError::AssignmentTargetNotFound);
        };

        let restaurant_pizza = catalog.insert_restaurant_pizza(&NewRestaurantPizza::new(
            restaurant.id,
            pizza.id,
            assignment.price,
        ))?;
        info!(
            restaurant_pizza_id = restaurant_pizza.id,
            restaurant_id = restaurant.id,
            pizza_id = pizza.id,
            price = restaurant_pizza.price,
            "restaurant pizza created"
        );

        Ok(Assignment {
            restaurant_pizza,
            pizza,
            restaurant,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPizza, NewRestaurant, Price};
    use crate::schema::restaurant_pizzas;
    use crate::{build_pool, run_migrations, test_connection};

    fn setup_catalog(conn: &mut SqliteConnection) -> (Restaurant, Pizza) {
        let mut catalog = Catalog::new(conn);
        let restaurant = catalog
            .insert_restaurant(&NewRestaurant {
                name: "Karen's Pizza Shack",
                address: "address1",
            })
            .unwrap();
        let pizza = catalog
            .insert_pizza(&NewPizza {
                name: "Emma",
                ingredients: "Dough, Tomato Sauce, Cheese",
            })
            .unwrap();
        (restaurant, pizza)
    }

    fn assignment(pizza_id: i32, restaurant_id: i32, price: i64) -> NewAssignment {
        NewAssignment {
            pizza_id: pizza_id.into(),
            restaurant_id: restaurant_id.into(),
            price: Price::new(price).unwrap(),
        }
    }

    fn count_restaurant_pizzas(conn: &mut SqliteConnection) -> i64 {
        restaurant_pizzas::table.count().get_result(conn).unwrap()
    }

    #[test]
    fn test_list_restaurants_is_stable() {
        let conn = &mut test_connection();
        setup_catalog(conn);
        Catalog::new(conn)
            .insert_restaurant(&NewRestaurant {
                name: "Sanjay's Pizza",
                address: "address2",
            })
            .unwrap();

        let first = list_restaurants(conn).unwrap();
        let second = list_restaurants(conn).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert!(first[0].id < first[1].id);
    }

    #[test]
    fn test_get_restaurant_not_found() {
        let conn = &mut test_connection();
        assert!(matches!(
            get_restaurant(conn, 42),
            Err(CatalogError::RestaurantNotFound)
        ));
    }

    #[test]
    fn test_create_restaurant_pizza_round_trip() {
        let conn = &mut test_connection();
        let (restaurant, pizza) = setup_catalog(conn);

        let created = create_restaurant_pizza(conn, assignment(pizza.id, restaurant.id, 12)).unwrap();
        assert_eq!(created.restaurant_pizza.price, 12);
        assert_eq!(created.restaurant_pizza.pizza_id, pizza.id);
        assert_eq!(created.restaurant_pizza.restaurant_id, restaurant.id);
        assert_eq!(created.pizza, pizza);
        assert_eq!(created.restaurant, restaurant);

        let restaurant_detail = get_restaurant(conn, restaurant.id).unwrap();
        assert_eq!(
            restaurant_detail.restaurant_pizzas,
            vec![(created.restaurant_pizza.clone(), pizza.clone())]
        );

        let pizza_detail = get_pizza(conn, pizza.id).unwrap();
        assert_eq!(
            pizza_detail.restaurant_pizzas,
            vec![(created.restaurant_pizza, restaurant)]
        );
    }

    #[test]
    fn test_create_restaurant_pizza_missing_target() {
        let conn = &mut test_connection();
        let (restaurant, pizza) = setup_catalog(conn);

        for (pizza_id, restaurant_id) in [(pizza.id + 100, restaurant.id), (pizza.id, restaurant.id + 100)] {
            let result = create_restaurant_pizza(conn, assignment(pizza_id, restaurant_id, 10));
            assert!(matches!(result, Err(CatalogError::AssignmentTargetNotFound)));
        }
        assert_eq!(count_restaurant_pizzas(conn), 0);
    }

    #[test]
    fn test_create_restaurant_pizza_id_beyond_column_range() {
        let conn = &mut test_connection();
        let (restaurant, _) = setup_catalog(conn);

        let result = create_restaurant_pizza(
            conn,
            NewAssignment {
                pizza_id: 3_000_000_000,
                restaurant_id: restaurant.id.into(),
                price: Price::new(10).unwrap(),
            },
        );

        assert!(matches!(result, Err(CatalogError::AssignmentTargetNotFound)));
        assert_eq!(count_restaurant_pizzas(conn), 0);
    }

    #[test]
    fn test_concurrent_create_restaurant_pizza() {
        let dir = tempfile::tempdir().unwrap();
        let database_url = dir.path().join("catalog.db").to_str().unwrap().to_string();
        let pool = build_pool(&database_url, 8).unwrap();
        let (restaurant, pizza) = {
            let conn = &mut pool.get().unwrap();
            run_migrations(conn).unwrap();
            setup_catalog(conn)
        };

        let failures: usize = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let conn = &mut pool.get().unwrap();
                        (0..20)
                            .filter(|i| {
                                let price = i % 30 + 1;
                                create_restaurant_pizza(
                                    conn,
                                    assignment(pizza.id, restaurant.id, price),
                                )
                                .is_err()
                            })
                            .count()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).sum()
        });

        assert_eq!(failures, 0);
        let conn = &mut pool.get().unwrap();
        assert_eq!(count_restaurant_pizzas(conn), 160);
    }

    #[test]
    fn test_delete_restaurant_cascades() {
        let conn = &mut test_connection();
        let (restaurant, pizza) = setup_catalog(conn);
        create_restaurant_pizza(conn, assignment(pizza.id, restaurant.id, 5)).unwrap();
        create_restaurant_pizza(conn, assignment(pizza.id, restaurant.id, 25)).unwrap();
        assert_eq!(count_restaurant_pizzas(conn), 2);

        delete_restaurant(conn, restaurant.id).unwrap();

        assert_eq!(count_restaurant_pizzas(conn), 0);
        assert!(matches!(
            get_restaurant(conn, restaurant.id),
            Err(CatalogError::RestaurantNotFound)
        ));
        assert!(get_pizza(conn, pizza.id).unwrap().restaurant_pizzas.is_empty());
    }

    #[test]
    fn test_delete_restaurant_not_found() {
        let conn = &mut test_connection();
        assert!(matches!(
            delete_restaurant(conn, 7),
            Err(CatalogError::RestaurantNotFound)
        ));
    }

    #[test]
    fn test_get_pizza_not_found() {
        let conn = &mut test_connection();
        assert!(matches!(get_pizza(conn, 1), Err(CatalogError::PizzaNotFound)));
    }
}
