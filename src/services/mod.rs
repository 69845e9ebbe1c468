pub mod context;
pub mod grocery_service;
pub mod tree;

use uuid::Uuid;

use crate::db::dao::DaoLayerError;

pub use context::ServiceContext;
pub use grocery_service::GroceryService;
pub use tree::{GroceryNode, TreeSummary};

#[derive(Debug, thiserror::Error)]
pub enum GroceryError {
    /// Rejected input; raised before the store is touched.
    #[error("{0}")]
    Validation(String),
    #[error("Grocery item {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Storage(#[from] DaoLayerError),
}

pub type GroceryResult<T> = Result<T, GroceryError>;
