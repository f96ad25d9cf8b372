use std::sync::Arc;

use tracing::info;

use mediadeck::media::MediaStorage;
use mediadeck::proxy::Forwarder;
use mediadeck::web::handlers::AppState;
use mediadeck::web::WebServer;
use mediadeck::{Config, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = mediadeck::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        mediadeck::logging::init_console_only(&config.logging.level);
    }

    info!("mediadeck - media library backend");

    let db = Arc::new(Database::open(&config.database.path).await?);
    let storage = MediaStorage::new(&config.storage.upload_dir)?;
    let forwarder = Forwarder::new(config.proxy.clone())?;

    let app_state = Arc::new(AppState::new(
        db,
        storage,
        forwarder,
        config.storage.default_storage_limit,
        config.server.environment.clone(),
    ));

    let server = WebServer::new(&config.server.host, config.server.port, app_state);
    info!("Server configured on {}", server.addr());

    server.run().await?;

    Ok(())
}
