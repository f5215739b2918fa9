use crate::{auth::TokenKeys, config::Settings};
use sea_orm::DatabaseConnection;

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Business settings
    pub settings: Settings,
    /// Login token keys
    pub keys: TokenKeys,
}

impl AppState {
    /// Bundles the handles the handlers need.
    #[must_use]
    pub const fn new(db: DatabaseConnection, settings: Settings, keys: TokenKeys) -> Self {
        Self { db, settings, keys }
    }
}
