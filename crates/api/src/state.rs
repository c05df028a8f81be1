use std::sync::Arc;

use lisan_mailer::VerificationSender;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lisan_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Delivers email verification codes.
    pub mailer: Arc<dyn VerificationSender>,
}
