use std::sync::Arc;

use api::auth::TokenKeys;
use sqlx::PgPool;

use super::settings::Settings;

/// Shared state handed to every handler.
pub struct AppState {
    pub pool: PgPool,
    pub token_keys: TokenKeys,
    pub settings: Settings,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Arc<Self>> {
        let pool = api::db::connect(&settings.database.url()).await?;
        let token_keys = TokenKeys::new(&settings.jwt.secret, settings.jwt.expiration_hours);

        Ok(Arc::new(Self {
            pool,
            token_keys,
            settings,
        }))
    }
}
