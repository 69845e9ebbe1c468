use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, Order, PrimaryKeyTrait, QueryOrder,
};
use uuid::Uuid;

use super::base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

/// Shared row operations for uuid-keyed, timestamped entities.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + HasIdActiveModel
        + TimestampedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
    Self::Entity: HasCreatedAtColumn,
{
    type Entity: EntityTrait + Send + Sync;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    /// Inserts with a fresh time-ordered id, so id order follows insertion order.
    async fn create<A>(&self, data: A) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        A: IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::now_v7());
        active.set_created_at(now);
        active.set_updated_at(now);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    /// One ordered read of the whole table; `created_at` ascending when `order` is empty.
    async fn find_all(
        &self,
        order: &[(<Self::Entity as EntityTrait>::Column, Order)],
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>>
    where
        <Self::Entity as EntityTrait>::Column: Clone + Send + Sync,
    {
        let select = Self::Entity::find();
        let ordered = if order.is_empty() {
            select.order_by_asc(Self::Entity::created_at_column())
        } else {
            order
                .iter()
                .cloned()
                .fold(select, |select, (column, order)| select.order_by(column, order))
        };
        ordered.all(self.db()).await.map_err(DaoLayerError::Db)
    }

    /// Returns `None` when the row is gone; `updated_at` is always refreshed.
    async fn update<F>(
        &self,
        id: Uuid,
        apply: F,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        match active.update(self.db()).await {
            Ok(model) => Ok(Some(model)),
            // deleted between the lookup and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(DaoLayerError::Db(err)),
        }
    }

    async fn delete(&self, id: Uuid) -> DaoResult<bool> {
        let result = Self::Entity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        Ok(result.rows_affected > 0)
    }
}
