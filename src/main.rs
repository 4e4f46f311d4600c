use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use paintbook_api::config::ApiConfig;
use paintbook_core::store::Stores;
use paintbook_db::{PgStore, create_pool, schema::initialize_database};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    paintbook_api::init_tracing(config.log_level)?;

    info!("Connecting to database...");
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;
    initialize_database(&db_pool).await?;

    let stores = Stores::from_backend(Arc::new(PgStore::new(db_pool)));
    paintbook_api::start_server(config, stores).await?;

    Ok(())
}
