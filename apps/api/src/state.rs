use std::sync::Arc;

use crate::config::Config;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable document store. Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn ProfileStore>,
    pub config: Config,
}
