use clap::Args;
use pizzeria_catalog::DEFAULT_DATABASE_URL;

#[derive(Args, Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5555")]
    pub bind_address: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,
}
