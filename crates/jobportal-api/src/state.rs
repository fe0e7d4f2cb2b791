//! Application state.

use std::sync::Arc;

use jobportal_store::{JobStore, StoreError};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<JobStore>,
}

impl AppState {
    /// Create new application state, connecting to the database.
    pub async fn new(config: ApiConfig) -> Result<Self, StoreError> {
        let store = JobStore::connect(&config.database_uri, &config.database_name).await?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }
}
