use color_eyre::eyre::Result;
use dotenv::dotenv;
use paintbook_api::config::ApiConfig;
use paintbook_db::{schema::initialize_database, seed::seed_demo_data};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    // Same DATABASE_URL, DATABASE_MAX_CONNECTIONS and LOG_LEVEL as the server
    let config = ApiConfig::from_env()?;
    paintbook_api::init_tracing(config.log_level)?;

    let db_pool = paintbook_db::create_pool(&config.database_url, config.database_max_connections).await?;
    initialize_database(&db_pool).await?;

    let summary = seed_demo_data(&db_pool).await?;
    info!(
        "Seeded {} painters, {} customers, {} availabilities and {} bookings",
        summary.painters_created,
        summary.customers_created,
        summary.availabilities_created,
        summary.bookings_created
    );

    Ok(())
}
