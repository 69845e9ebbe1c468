use std::sync::Arc;

use crate::{db::GroceryStore, services::GroceryService, state::AppState};

#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn GroceryStore>,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn GroceryStore>) -> Self {
        Self { store }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.store))
    }

    pub fn grocery(&self) -> GroceryService {
        GroceryService::new(Arc::clone(&self.store))
    }
}
