use diesel::{insert_into, prelude::*};

use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

/// Queries against one connection, normally the connection of an open
/// transaction. Holds no state of its own.
pub struct Catalog<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> Catalog<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn restaurants(&mut self) -> QueryResult<Vec<Restaurant>> {
        restaurants::table
            .order(restaurants::id)
            .select(Restaurant::as_select())
            .load(self.conn)
    }

    pub fn find_restaurant(&mut self, restaurant_id: i32) -> QueryResult<Option<Restaurant>> {
        restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(self.conn)
            .optional()
    }

    /// Associations of a restaurant joined with their pizza in one query.
    pub fn restaurant_pizzas_of_restaurant(
        &mut self,
        restaurant: &Restaurant,
    ) -> QueryResult<Vec<(RestaurantPizza, Pizza)>> {
        RestaurantPizza::belonging_to(restaurant)
            .inner_join(pizzas::table)
            .order(restaurant_pizzas::id)
            .select((RestaurantPizza::as_select(), Pizza::as_select()))
            .load(self.conn)
    }

    pub fn pizzas(&mut self) -> QueryResult<Vec<Pizza>> {
        pizzas::table
            .order(pizzas::id)
            .select(Pizza::as_select())
            .load(self.conn)
    }

    pub fn find_pizza(&mut self, pizza_id: i32) -> QueryResult<Option<Pizza>> {
        pizzas::table
            .find(pizza_id)
            .select(Pizza::as_select())
            .first(self.conn)
            .optional()
    }

    pub fn restaurant_pizzas_of_pizza(
        &mut self,
        pizza: &Pizza,
    ) -> QueryResult<Vec<(RestaurantPizza, Restaurant)>> {
        RestaurantPizza::belonging_to(pizza)
            .inner_join(restaurants::table)
            .order(restaurant_pizzas::id)
            .select((RestaurantPizza::as_select(), Restaurant::as_select()))
            .load(self.conn)
    }

    pub fn insert_restaurant(&mut self, restaurant: &NewRestaurant) -> QueryResult<Restaurant> {
        insert_into(restaurants::table)
            .values(restaurant)
            .returning(Restaurant::as_returning())
            .get_result(self.conn)
    }

    pub fn insert_pizza(&mut self, pizza: &NewPizza) -> QueryResult<Pizza> {
        insert_into(pizzas::table)
            .values(pizza)
            .returning(Pizza::as_returning())
            .get_result(self.conn)
    }

    pub fn insert_restaurant_pizza(
        &mut self,
        restaurant_pizza: &NewRestaurantPizza,
    ) -> QueryResult<RestaurantPizza> {
        insert_into(restaurant_pizzas::table)
            .values(restaurant_pizza)
            .returning(RestaurantPizza::as_returning())
            .get_result(self.conn)
    }

    /// Deletes the restaurant's associations, then the restaurant itself.
    /// Returns the number of associations removed.
    pub fn delete_restaurant(&mut self, restaurant: &Restaurant) -> QueryResult<usize> {
        let removed = diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
        )
        .execute(self.conn)?;
        diesel::delete(restaurants::table.find(restaurant.id)).execute(self.conn)?;
        Ok(removed)
    }

    pub fn clear(&mut self) -> QueryResult<()> {
        diesel::delete(restaurant_pizzas::table).execute(self.conn)?;
        diesel::delete(restaurants::table).execute(self.conn)?;
        diesel::delete(pizzas::table).execute(self.conn)?;
        Ok(())
    }
}
