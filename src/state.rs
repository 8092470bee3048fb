use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{AdminAuthenticator, JwtAdminAuthenticator};
use crate::config::AppConfig;
use crate::database::IndexEnsurer;

/// Shared handler state, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AdminAuthenticator>,
    pub indexes: Arc<IndexEnsurer>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        let auth = Arc::new(JwtAdminAuthenticator::from_config(&config.security));
        Self {
            pool,
            config: Arc::new(config),
            auth,
            indexes: Arc::new(IndexEnsurer::new()),
        }
    }

    /// Swap the admin check, e.g. for a different identity provider.
    pub fn with_authenticator(mut self, auth: Arc<dyn AdminAuthenticator>) -> Self {
        self.auth = auth;
        self
    }
}
