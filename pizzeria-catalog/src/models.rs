use std::ops::RangeInclusive;

use diesel::prelude::*;

use crate::error::CatalogError;
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_RANGE: RangeInclusive<i64> = 1..=30;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
}

/// Join row between a restaurant and a pizza, carrying the price the
/// restaurant charges for it.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// A price already checked against [`PRICE_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i32);

impl Price {
    pub fn new(value: i64) -> Result<Self, CatalogError> {
        if !PRICE_RANGE.contains(&value) {
            return Err(CatalogError::validation(format!(
                "Price must be between {} and {}",
                PRICE_RANGE.start(),
                PRICE_RANGE.end()
            )));
        }
        Ok(Price(value as i32))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

/// Insert form of [`RestaurantPizza`]. Only constructible from a validated
/// [`Price`], so an out-of-range price never reaches the store.
#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(restaurant_id: i32, pizza_id: i32, price: Price) -> Self {
        Self {
            price: price.value(),
            restaurant_id,
            pizza_id,
        }
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn restaurant_id(&self) -> i32 {
        self.restaurant_id
    }

    pub fn pizza_id(&self) -> i32 {
        self.pizza_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bounds_are_inclusive() {
        assert_eq!(Price::new(1).unwrap().value(), 1);
        assert_eq!(Price::new(30).unwrap().value(), 30);
    }

    #[test]
    fn test_price_out_of_range() {
        for value in [0, 31, -5, i64::from(i32::MAX) + 1] {
            let err = Price::new(value).unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)), "{value}");
        }
    }

    #[test]
    fn test_new_restaurant_pizza_keeps_price() {
        let row = NewRestaurantPizza::new(3, 7, Price::new(12).unwrap());
        assert_eq!(row.price(), 12);
        assert_eq!(row.restaurant_id(), 3);
        assert_eq!(row.pizza_id(), 7);
    }
}
