pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod grocery_dao;

pub use base::DaoBase;
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use grocery_dao::GroceryDao;
