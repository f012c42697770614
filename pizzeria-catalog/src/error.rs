#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Pizza not found")]
    PizzaNotFound,
    #[error("Validation failed. Pizza or Restaurant not found.")]
    AssignmentTargetNotFound,
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("migration failed: {0}")]
    Migration(String),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(vec![message.into()])
    }
}
