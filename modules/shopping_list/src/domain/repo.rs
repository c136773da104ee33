use crate::contract::model::GroceryItem;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    /// All items in creation order (oldest first).
    async fn list(&self) -> anyhow::Result<Vec<GroceryItem>>;
    /// Load an item by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<GroceryItem>>;
    /// Insert a fully-formed item.
    ///
    /// Service computes id/timestamps/defaults; repo persists.
    async fn insert(&self, item: GroceryItem) -> anyhow::Result<()>;
    /// Update an existing item (by primary key in `item.id`).
    async fn update(&self, item: GroceryItem) -> anyhow::Result<()>;
    /// Delete by id. Returns true if an item was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Remove all bought items. Returns the number removed.
    async fn delete_bought(&self) -> anyhow::Result<u64>;
}
