use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use pizzeria_api::{
    config::{DatabaseConfig, ServeConfig},
    create_router,
    handlers::AppState,
};
use pizzeria_catalog::{build_pool, establish_connection, run_migrations, seed::seed};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending migrations and serve the HTTP API
    Serve(ServeConfig),
    /// Run pending migrations and exit
    Migrate(DatabaseConfig),
    /// Replace the catalog with sample restaurants and pizzas
    Seed(DatabaseConfig),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(config) => serve(config).await,
        Commands::Migrate(config) => migrate(&config),
        Commands::Seed(config) => {
            let conn = &mut establish_connection(&config.database_url)?;
            run_migrations(conn)?;
            let summary = seed(conn)?;
            info!(?summary, "seeded {}", config.database_url);
            Ok(())
        }
    }
}

fn migrate(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = &mut establish_connection(&config.database_url)?;
    let applied = run_migrations(conn)?;
    info!(?applied, "migrations applied to {}", config.database_url);
    Ok(())
}

async fn serve(config: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    migrate(&config.database)?;

    let pool = build_pool(&config.database.database_url, config.pool_size)?;
    let app = create_router(AppState { pool });

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Pizzeria API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
