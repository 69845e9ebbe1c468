#[allow(unused_imports)]
pub mod prelude {
    pub use super::grocery_item::Entity as GroceryItem;
}

pub mod grocery_item;
