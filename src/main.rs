use gym_stats::api::routes::create_routes;
use gym_stats::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    if app_config.is_development() {
        DatabaseSeeder::new(pool.clone()).seed_all().await?;
    }

    let app = create_routes(pool);

    let address = app_config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("gym-stats server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
