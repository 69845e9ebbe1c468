use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{GroceryItemChanges, NewGroceryItem, entities::grocery_item},
    response::{ApiResult, JsonApiResponse},
    services::{GroceryNode, GroceryService, ServiceContext, TreeSummary},
    state::AppState,
};

const BASE_PATH: &str = "/groceries";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveRequest {
    pub parent_id: Option<Uuid>,
    pub sort_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleRequest {
    pub is_checked: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(BASE_PATH, get(list_nested).post(create_item))
        .route(&format!("{BASE_PATH}/flat"), get(list_flat))
        .route(&format!("{BASE_PATH}/summary"), get(summary))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route(&format!("{BASE_PATH}/{{id}}/move"), post(move_item))
        .route(&format!("{BASE_PATH}/{{id}}/toggle"), post(toggle_item))
        .with_state(state)
}

async fn list_nested(State(state): State<Arc<AppState>>) -> ApiResult<Vec<GroceryNode>> {
    let forest = grocery_service(&state).list_nested().await?;
    JsonApiResponse::ok(forest)
}

async fn list_flat(State(state): State<Arc<AppState>>) -> ApiResult<Vec<grocery_item::Model>> {
    let items = grocery_service(&state).list_flat().await?;
    JsonApiResponse::ok(items)
}

async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<TreeSummary> {
    let summary = grocery_service(&state).summary().await?;
    JsonApiResponse::ok(summary)
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewGroceryItem>,
) -> ApiResult<grocery_item::Model> {
    let item = grocery_service(&state).create(body).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", item)
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Option<grocery_item::Model>> {
    match grocery_service(&state).get(id).await? {
        Some(item) => JsonApiResponse::ok(Some(item)),
        None => JsonApiResponse::with_status(StatusCode::OK, "not found", None),
    }
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<GroceryItemChanges>,
) -> ApiResult<grocery_item::Model> {
    let item = grocery_service(&state).update(id, body).await?;
    JsonApiResponse::ok(item)
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<DeleteResponse> {
    let success = grocery_service(&state).delete(id).await?;
    JsonApiResponse::ok(DeleteResponse { success })
}

async fn move_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<MoveRequest>,
) -> ApiResult<grocery_item::Model> {
    let item = grocery_service(&state)
        .move_item(id, body.parent_id, body.sort_order)
        .await?;
    JsonApiResponse::ok(item)
}

async fn toggle_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ToggleRequest>,
) -> ApiResult<grocery_item::Model> {
    let item = grocery_service(&state).toggle(id, body.is_checked).await?;
    JsonApiResponse::ok(item)
}

fn grocery_service(state: &AppState) -> GroceryService {
    ServiceContext::from_state(state).grocery()
}
