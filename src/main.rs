use dotenvy::dotenv;
use points_transfer::{
    auth::TokenKeys,
    config::{self, database},
    errors::Result,
    http::{self, AppState},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Business settings from config.toml, or defaults
    let settings = config::settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(?settings, "Settings loaded");

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Token keys; the secret is read here and never stored in settings
    let keys = TokenKeys::new(&config::settings::jwt_secret(), settings.token_ttl_hours);

    // 6. Serve
    let port = config::settings::listen_port()?;
    let app = http::router(Arc::new(AppState::new(db, settings, keys)));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
