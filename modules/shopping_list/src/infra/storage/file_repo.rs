use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::contract::model::{Category, GroceryItem};
use crate::domain::repo::ItemsRepository;

/// On-disk record. Field names match the REST wire layout so the document
/// stays readable and portable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    id: Uuid,
    name: String,
    quantity: u32,
    category: String,
    #[serde(default)]
    notes: Option<String>,
    bought: bool,
    created_at: DateTime<Utc>,
    #[serde(default)]
    bought_at: Option<DateTime<Utc>>,
}

impl From<&GroceryItem> for StoredItem {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            category: item.category.as_str().to_string(),
            notes: item.notes.clone(),
            bought: item.bought,
            created_at: item.created_at,
            bought_at: item.bought_at,
        }
    }
}

impl StoredItem {
    fn into_item(self) -> GroceryItem {
        GroceryItem {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            category: Category::parse(&self.category),
            notes: self.notes,
            bought: self.bought,
            created_at: self.created_at,
            bought_at: self.bought_at,
        }
    }
}

/// Repository backed by a single JSON array document: loaded once at startup,
/// rewritten wholesale on every mutation.
///
/// An async lock is held across the file write so mutations serialize with
/// each other and the document on disk always matches the vector.
pub struct FileRepository {
    path: PathBuf,
    items: RwLock<Vec<GroceryItem>>,
}

impl FileRepository {
    /// Open the document at `path`. A missing file starts an empty list; an
    /// unreadable document is logged and treated as empty.
    pub async fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let items = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<Vec<StoredItem>>(&raw) {
                Ok(stored) => stored.into_iter().map(StoredItem::into_item).collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Unreadable item document, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to read {}", path.display())))
            }
        };

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, items: &[GroceryItem]) -> anyhow::Result<()> {
        let stored: Vec<StoredItem> = items.iter().map(StoredItem::from).collect();
        let json = serde_json::to_string_pretty(&stored)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| anyhow::Error::new(e).context(format!("Failed to write {}", self.path.display())))
    }
}

#[async_trait]
impl ItemsRepository for FileRepository {
    async fn list(&self) -> anyhow::Result<Vec<GroceryItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<GroceryItem>> {
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, item: GroceryItem) -> anyhow::Result<()> {
        let mut items = self.items.write().await;
        items.push(item);
        self.persist(&items).await
    }

    async fn update(&self, item: GroceryItem) -> anyhow::Result<()> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item,
            None => anyhow::bail!("no item with id {}", item.id),
        }
        self.persist(&items).await
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.persist(&items).await?;
        Ok(true)
    }

    async fn delete_bought(&self) -> anyhow::Result<u64> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| !i.bought);
        let removed = (before - items.len()) as u64;
        if removed > 0 {
            self.persist(&items).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn item(name: &str, bought: bool) -> GroceryItem {
        GroceryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: 3,
            category: Category::Produce,
            notes: Some("ripe".to_string()),
            bought,
            created_at: Utc::now(),
            bought_at: bought.then(Utc::now),
        }
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let repo = FileRepository::load(dir.path().join("items.json"))
            .await
            .unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn items_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.json");

        let repo = FileRepository::load(&path).await.unwrap();
        let stored = item("bananas", false);
        repo.insert(stored.clone()).await.unwrap();

        let reloaded = FileRepository::load(&path).await.unwrap();
        let items = reloaded.list().await.unwrap();
        assert_eq!(items, vec![stored]);
    }

    #[tokio::test]
    async fn document_is_a_camel_case_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.json");

        let repo = FileRepository::load(&path).await.unwrap();
        repo.insert(item("yogurt", true)).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let arr = doc.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert!(arr[0].get("createdAt").is_some());
        assert!(arr[0].get("boughtAt").is_some());
        assert!(arr[0].get("created_at").is_none());
    }

    #[tokio::test]
    async fn corrupt_document_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let repo = FileRepository::load(&path).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_bought_rewrites_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.json");

        let repo = FileRepository::load(&path).await.unwrap();
        repo.insert(item("keep", false)).await.unwrap();
        repo.insert(item("done", true)).await.unwrap();

        assert_eq!(repo.delete_bought().await.unwrap(), 1);

        let reloaded = FileRepository::load(&path).await.unwrap();
        let items = reloaded.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "keep");
    }
}
