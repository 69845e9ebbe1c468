use sea_orm::DatabaseConnection;

use super::{DaoBase, GroceryDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn grocery(&self) -> GroceryDao {
        GroceryDao::new(&self.db)
    }
}
