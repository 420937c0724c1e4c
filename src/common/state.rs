// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::AuthService;
use crate::common::config::AppConfig;
use crate::users::UserStore;

/// Application state containing database pool, services, and configuration
///
/// Every field is either cheap to clone or behind an `Arc`; nothing here is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub users: Arc<UserStore>,
    pub auth: Arc<AuthService>,
}
