use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dao::DaoResult;
use super::entities::grocery_item;
use super::store::{GroceryItemChanges, GroceryStore, NewGroceryItem};

/// Process-local store used when no database is configured.
///
/// Rows are lost on restart. Ordering and id assignment match `GroceryDao`.
#[derive(Default)]
pub struct MemoryGroceryStore {
    rows: RwLock<HashMap<Uuid, grocery_item::Model>>,
}

impl MemoryGroceryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroceryStore for MemoryGroceryStore {
    async fn insert(&self, item: NewGroceryItem) -> DaoResult<grocery_item::Model> {
        let now = Utc::now().fixed_offset();
        let model = grocery_item::Model {
            id: Uuid::now_v7(),
            title: item.title,
            description: item.description,
            quantity: item.quantity,
            unit: item.unit,
            is_checked: false,
            is_category: item.is_category,
            parent_id: item.parent_id,
            sort_order: item.sort_order,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.insert(model.id, model.clone());
        Ok(model)
    }

    async fn select_all(&self) -> DaoResult<Vec<grocery_item::Model>> {
        let mut rows: Vec<_> = self.rows.read().await.values().cloned().collect();
        rows.sort_by_key(|row| (row.sort_order, row.id));
        Ok(rows)
    }

    async fn select_one(&self, id: Uuid) -> DaoResult<Option<grocery_item::Model>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update_fields(
        &self,
        id: Uuid,
        changes: GroceryItemChanges,
    ) -> DaoResult<Option<grocery_item::Model>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(row);
        row.updated_at = Utc::now().fixed_offset();
        Ok(Some(row.clone()))
    }

    async fn delete_one(&self, id: Uuid) -> DaoResult<bool> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryGroceryStore;
    use crate::db::store::{GroceryItemChanges, GroceryStore, NewGroceryItem};

    fn named(title: &str, sort_order: i32) -> NewGroceryItem {
        NewGroceryItem {
            title: title.to_string(),
            sort_order,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn select_all_orders_by_sort_order_then_insertion() {
        let store = MemoryGroceryStore::new();
        let late = store.insert(named("late", 2)).await.expect("insert");
        let tie_a = store.insert(named("tie a", 1)).await.expect("insert");
        let tie_b = store.insert(named("tie b", 1)).await.expect("insert");

        let ids: Vec<_> = store
            .select_all()
            .await
            .expect("select")
            .into_iter()
            .map(|row| row.id)
            .collect();

        assert_eq!(ids, vec![tie_a.id, tie_b.id, late.id]);
    }

    #[tokio::test]
    async fn update_fields_on_missing_row_is_none() {
        let store = MemoryGroceryStore::new();
        let result = store
            .update_fields(uuid::Uuid::now_v7(), GroceryItemChanges::checked(true))
            .await
            .expect("update");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_one_reports_absence() {
        let store = MemoryGroceryStore::new();
        let row = store.insert(named("gone", 0)).await.expect("insert");

        assert!(store.delete_one(row.id).await.expect("delete"));
        assert!(!store.delete_one(row.id).await.expect("delete"));
        assert!(store.select_one(row.id).await.expect("select").is_none());
    }
}
