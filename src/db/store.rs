use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::dao::DaoResult;
use super::entities::grocery_item;

/// Record store the grocery service runs against.
///
/// Every method touches at most one row; ids and timestamps are assigned by
/// the store. `select_all` returns rows ordered by `sort_order`, then `id`.
#[async_trait]
pub trait GroceryStore: Send + Sync {
    async fn insert(&self, item: NewGroceryItem) -> DaoResult<grocery_item::Model>;

    async fn select_all(&self) -> DaoResult<Vec<grocery_item::Model>>;

    async fn select_one(&self, id: Uuid) -> DaoResult<Option<grocery_item::Model>>;

    /// Returns `None` when no row has `id`; `updated_at` is refreshed otherwise.
    async fn update_fields(
        &self,
        id: Uuid,
        changes: GroceryItemChanges,
    ) -> DaoResult<Option<grocery_item::Model>>;

    async fn delete_one(&self, id: Uuid) -> DaoResult<bool>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewGroceryItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub is_category: bool,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Sparse set of column changes.
///
/// Outer `None` leaves the column alone. For nullable columns `Some(None)`
/// clears it, which is how a JSON `null` is told apart from a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroceryItemChanges {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub quantity: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_checked: Option<bool>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_category: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}

impl GroceryItemChanges {
    pub fn position(parent_id: Option<Uuid>, sort_order: i32) -> Self {
        Self {
            parent_id: Some(parent_id),
            sort_order: Some(sort_order),
            ..Default::default()
        }
    }

    pub fn checked(is_checked: bool) -> Self {
        Self {
            is_checked: Some(is_checked),
            ..Default::default()
        }
    }

    /// Applies the changes to an in-memory row, leaving timestamps untouched.
    pub fn apply_to(&self, model: &mut grocery_item::Model) {
        if let Some(title) = &self.title {
            model.title = title.clone();
        }
        if let Some(description) = &self.description {
            model.description = description.clone();
        }
        if let Some(quantity) = self.quantity {
            model.quantity = quantity;
        }
        if let Some(unit) = &self.unit {
            model.unit = unit.clone();
        }
        if let Some(is_checked) = self.is_checked {
            model.is_checked = is_checked;
        }
        if let Some(is_category) = self.is_category {
            model.is_category = is_category;
        }
        if let Some(parent_id) = self.parent_id {
            model.parent_id = parent_id;
        }
        if let Some(sort_order) = self.sort_order {
            model.sort_order = sort_order;
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(serde::de::Error::custom("field cannot be null")),
    }
}
