use std::sync::Arc;

use crate::{config::AppConfig, db::GroceryStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn GroceryStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn GroceryStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
