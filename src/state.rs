use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
