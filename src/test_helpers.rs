use std::sync::Arc;

use axum::{Router, middleware};

use crate::{
    config::AppConfig,
    db::{GroceryStore, MemoryGroceryStore},
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

/// Router wired the same way as the binary, over a fresh in-memory store.
pub fn test_router() -> Router {
    test_router_with_store(Arc::new(MemoryGroceryStore::new()))
}

pub fn test_router_with_store(store: Arc<dyn GroceryStore>) -> Router {
    let state = AppState::new(AppConfig::default(), store);
    router(Arc::clone(&state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
}
