use sea_orm::entity::prelude::*;

use crate::db::dao::base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};

/// One row of the checklist. Categories and items share the table; the
/// hierarchy lives only in `parent_id`, which is never checked against `id`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "grocery_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    #[sea_orm(default_value = false)]
    pub is_checked: bool,
    #[sea_orm(default_value = false)]
    pub is_category: bool,
    #[sea_orm(indexed)]
    pub parent_id: Option<Uuid>,
    #[sea_orm(default_value = 0)]
    pub sort_order: i32,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub updated_at: DateTimeWithTimeZone,
}

impl ActiveModelBehavior for ActiveModel {}

impl HasIdActiveModel for ActiveModel {
    fn set_id(&mut self, id: Uuid) {
        self.id = sea_orm::Set(id);
    }
}

impl TimestampedActiveModel for ActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone) {
        self.created_at = sea_orm::Set(ts);
    }

    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone) {
        self.updated_at = sea_orm::Set(ts);
    }
}

impl HasCreatedAtColumn for Entity {
    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}
