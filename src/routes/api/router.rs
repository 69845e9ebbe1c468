use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::{groceries, public};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(groceries::router(state))
}
