use std::{collections::HashSet, sync::Arc};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    GroceryError, GroceryResult,
    tree::{self, GroceryNode, TreeSummary},
};
use crate::db::{
    entities::grocery_item,
    store::{GroceryItemChanges, GroceryStore, NewGroceryItem},
};

/// Scale of the `quantity` column.
pub const QUANTITY_SCALE: u32 = 2;
/// `NUMERIC(10, 2)` holds eight integer digits.
const QUANTITY_INTEGER_DIGITS: u32 = 8;

/// Single-record operations over a [`GroceryStore`] plus the nested read.
#[derive(Clone)]
pub struct GroceryService {
    store: Arc<dyn GroceryStore>,
}

impl GroceryService {
    pub fn new(store: Arc<dyn GroceryStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewGroceryItem) -> GroceryResult<grocery_item::Model> {
        let input = NewGroceryItem {
            title: normalize_title(&input.title)?,
            quantity: input.quantity.map(normalize_quantity).transpose()?,
            ..input
        };
        let item = self.store.insert(input).await?;
        info!(id = %item.id, is_category = item.is_category, "grocery item created");
        Ok(item)
    }

    pub async fn get(&self, id: Uuid) -> GroceryResult<Option<grocery_item::Model>> {
        Ok(self.store.select_one(id).await?)
    }

    pub async fn list_nested(&self) -> GroceryResult<Vec<GroceryNode>> {
        let records = self.store.select_all().await?;
        Ok(tree::assemble(records))
    }

    pub async fn list_flat(&self) -> GroceryResult<Vec<grocery_item::Model>> {
        let mut records = self.store.select_all().await?;
        tree::sort_flat(&mut records);
        Ok(records)
    }

    pub async fn summary(&self) -> GroceryResult<TreeSummary> {
        let forest = self.list_nested().await?;
        Ok(TreeSummary::of(&forest))
    }

    /// Applies only the fields present in `changes`; `updated_at` is refreshed
    /// even when nothing else changes.
    pub async fn update(
        &self,
        id: Uuid,
        changes: GroceryItemChanges,
    ) -> GroceryResult<grocery_item::Model> {
        let changes = GroceryItemChanges {
            title: changes.title.as_deref().map(normalize_title).transpose()?,
            quantity: match changes.quantity {
                Some(Some(quantity)) => Some(Some(normalize_quantity(quantity)?)),
                other => other,
            },
            ..changes
        };
        if let Some(Some(parent_id)) = changes.parent_id {
            self.ensure_not_descendant(id, parent_id).await?;
        }

        let item = self
            .store
            .update_fields(id, changes)
            .await?
            .ok_or(GroceryError::NotFound(id))?;
        debug!(id = %item.id, "grocery item updated");
        Ok(item)
    }

    /// Hard delete. Children keep their `parent_id` and drop out of the tree.
    pub async fn delete(&self, id: Uuid) -> GroceryResult<bool> {
        let deleted = self.store.delete_one(id).await?;
        info!(%id, deleted, "grocery item delete requested");
        Ok(deleted)
    }

    pub async fn move_item(
        &self,
        id: Uuid,
        parent_id: Option<Uuid>,
        sort_order: i32,
    ) -> GroceryResult<grocery_item::Model> {
        if let Some(parent_id) = parent_id {
            self.ensure_not_descendant(id, parent_id).await?;
        }

        let item = self
            .store
            .update_fields(id, GroceryItemChanges::position(parent_id, sort_order))
            .await?
            .ok_or(GroceryError::NotFound(id))?;
        info!(%id, parent_id = ?item.parent_id, sort_order, "grocery item moved");
        Ok(item)
    }

    pub async fn toggle(&self, id: Uuid, is_checked: bool) -> GroceryResult<grocery_item::Model> {
        let item = self
            .store
            .update_fields(id, GroceryItemChanges::checked(is_checked))
            .await?
            .ok_or(GroceryError::NotFound(id))?;
        debug!(%id, is_checked, "grocery item toggled");
        Ok(item)
    }

    /// Rejects re-parenting `id` under itself or anything below it.
    async fn ensure_not_descendant(&self, id: Uuid, parent_id: Uuid) -> GroceryResult<()> {
        if parent_id == id {
            return Err(GroceryError::Validation(
                "An item cannot be its own parent".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut cursor = Some(parent_id);
        while let Some(current) = cursor {
            if current == id {
                return Err(GroceryError::Validation(
                    "An item cannot be moved under one of its descendants".to_string(),
                ));
            }
            // stored data may already loop
            if !seen.insert(current) {
                break;
            }
            cursor = self
                .store
                .select_one(current)
                .await?
                .and_then(|ancestor| ancestor.parent_id);
        }
        Ok(())
    }
}

fn normalize_title(title: &str) -> GroceryResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(GroceryError::Validation("Title is required".to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_quantity(quantity: Decimal) -> GroceryResult<Decimal> {
    let rounded =
        quantity.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return Err(GroceryError::Validation(
            "Quantity must be positive".to_string(),
        ));
    }
    if rounded >= Decimal::from(10_i64.pow(QUANTITY_INTEGER_DIGITS)) {
        return Err(GroceryError::Validation("Quantity is too large".to_string()));
    }
    Ok(rounded)
}
