use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::contract::model::GroceryItem;
use crate::domain::repo::ItemsRepository;

/// Process-lifetime repository: one Vec behind a lock, nothing persisted.
#[derive(Default)]
pub struct MemoryRepository {
    items: RwLock<Vec<GroceryItem>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    pub fn with_items(items: Vec<GroceryItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemsRepository for MemoryRepository {
    async fn list(&self) -> anyhow::Result<Vec<GroceryItem>> {
        Ok(self.items.read().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<GroceryItem>> {
        Ok(self.items.read().iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, item: GroceryItem) -> anyhow::Result<()> {
        self.items.write().push(item);
        Ok(())
    }

    async fn update(&self, item: GroceryItem) -> anyhow::Result<()> {
        let mut items = self.items.write();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => anyhow::bail!("no item with id {}", item.id),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() < before)
    }

    async fn delete_bought(&self) -> anyhow::Result<u64> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|i| !i.bought);
        Ok((before - items.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::Category;
    use chrono::Utc;

    fn item(name: &str, bought: bool) -> GroceryItem {
        GroceryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: 1,
            category: Category::Other,
            notes: None,
            bought,
            created_at: Utc::now(),
            bought_at: bought.then(Utc::now),
        }
    }

    #[tokio::test]
    async fn insert_preserves_creation_order() {
        let repo = MemoryRepository::new();
        repo.insert(item("first", false)).await.unwrap();
        repo.insert(item("second", false)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn delete_bought_removes_only_bought() {
        let repo = MemoryRepository::with_items(vec![
            item("keep", false),
            item("gone", true),
            item("also gone", true),
        ]);

        assert_eq!(repo.delete_bought().await.unwrap(), 2);
        let left = repo.list().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "keep");

        // Nothing bought left: no-op.
        assert_eq!(repo.delete_bought().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let repo = MemoryRepository::new();
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
    }
}
