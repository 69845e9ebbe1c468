pub mod connection;
pub mod dao;
pub mod entities;
pub mod memory;
pub mod store;

pub use memory::MemoryGroceryStore;
pub use store::{GroceryItemChanges, GroceryStore, NewGroceryItem};
