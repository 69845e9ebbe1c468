use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Order, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::grocery_item::{self, Entity as GroceryItem};
use crate::db::store::{GroceryItemChanges, GroceryStore, NewGroceryItem};

#[derive(Clone)]
pub struct GroceryDao {
    db: DatabaseConnection,
}

impl DaoBase for GroceryDao {
    type Entity = GroceryItem;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl GroceryDao {
    fn sibling_order() -> Vec<(grocery_item::Column, Order)> {
        vec![
            (grocery_item::Column::SortOrder, Order::Asc),
            (grocery_item::Column::Id, Order::Asc),
        ]
    }
}

#[async_trait]
impl GroceryStore for GroceryDao {
    async fn insert(&self, item: NewGroceryItem) -> DaoResult<grocery_item::Model> {
        let model = grocery_item::ActiveModel {
            title: Set(item.title),
            description: Set(item.description),
            quantity: Set(item.quantity),
            unit: Set(item.unit),
            is_checked: Set(false),
            is_category: Set(item.is_category),
            parent_id: Set(item.parent_id),
            sort_order: Set(item.sort_order),
            ..Default::default()
        };
        self.create(model).await
    }

    async fn select_all(&self) -> DaoResult<Vec<grocery_item::Model>> {
        self.find_all(&Self::sibling_order()).await
    }

    async fn select_one(&self, id: Uuid) -> DaoResult<Option<grocery_item::Model>> {
        self.find_by_id(id).await
    }

    async fn update_fields(
        &self,
        id: Uuid,
        changes: GroceryItemChanges,
    ) -> DaoResult<Option<grocery_item::Model>> {
        self.update(id, move |active| {
            let GroceryItemChanges {
                title,
                description,
                quantity,
                unit,
                is_checked,
                is_category,
                parent_id,
                sort_order,
            } = changes;
            if let Some(title) = title {
                active.title = Set(title);
            }
            if let Some(description) = description {
                active.description = Set(description);
            }
            if let Some(quantity) = quantity {
                active.quantity = Set(quantity);
            }
            if let Some(unit) = unit {
                active.unit = Set(unit);
            }
            if let Some(is_checked) = is_checked {
                active.is_checked = Set(is_checked);
            }
            if let Some(is_category) = is_category {
                active.is_category = Set(is_category);
            }
            if let Some(parent_id) = parent_id {
                active.parent_id = Set(parent_id);
            }
            if let Some(sort_order) = sort_order {
                active.sort_order = Set(sort_order);
            }
        })
        .await
    }

    async fn delete_one(&self, id: Uuid) -> DaoResult<bool> {
        self.delete(id).await
    }
}
