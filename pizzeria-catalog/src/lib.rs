use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub mod assignment;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod service;

pub use diesel::SqliteConnection;
pub use error::CatalogError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Local file-backed store used when no connection string is configured.
pub const DEFAULT_DATABASE_URL: &str = "app.db";

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        apply_pragmas(conn).map_err(r2d2::Error::QueryError)
    }
}

fn apply_pragmas(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(
        "PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
    )
}

pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, CatalogError> {
    let mut conn = SqliteConnection::establish(database_url)?;
    apply_pragmas(&mut conn)?;
    Ok(conn)
}

pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, CatalogError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?;
    Ok(pool)
}

/// Applies every embedded migration not yet recorded, returning the applied versions.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<Vec<String>, CatalogError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| CatalogError::Migration(e.to_string()))?;
    Ok(applied.into_iter().map(|v| v.to_string()).collect())
}

#[cfg(test)]
pub(crate) fn test_connection() -> SqliteConnection {
    let mut conn = establish_connection(":memory:").unwrap();
    run_migrations(&mut conn).unwrap();
    conn
}
