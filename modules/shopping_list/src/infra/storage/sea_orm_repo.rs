//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection. Every read hits the
//! database; there is no in-process mirror to drift out of sync.

use anyhow::Context;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::contract::model::GroceryItem;
use crate::domain::repo::ItemsRepository;
use crate::infra::storage::entity::{Column, Entity as ItemEntity};
use crate::infra::storage::mapper::{contract_to_active, entity_to_contract};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmItemsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmItemsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> ItemsRepository for SeaOrmItemsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list(&self) -> anyhow::Result<Vec<GroceryItem>> {
        let rows = ItemEntity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(entity_to_contract).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<GroceryItem>> {
        let found = ItemEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(entity_to_contract))
    }

    async fn insert(&self, item: GroceryItem) -> anyhow::Result<()> {
        let m = contract_to_active(item);
        let _ = m.insert(&self.conn).await.context("insert failed")?;
        Ok(())
    }

    async fn update(&self, item: GroceryItem) -> anyhow::Result<()> {
        // Full-row update by primary key via ActiveModel::update.
        let m = contract_to_active(item);
        let _ = m.update(&self.conn).await.context("update failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = ItemEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_bought(&self) -> anyhow::Result<u64> {
        let res = ItemEntity::delete_many()
            .filter(Column::Bought.eq(true))
            .exec(&self.conn)
            .await
            .context("delete_bought failed")?;
        Ok(res.rows_affected)
    }
}
