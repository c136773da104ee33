use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Category, GroceryItem, GroceryItemPatch, NewGroceryItem};
use crate::domain::error::DomainError;
use crate::domain::events::ItemDomainEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::ItemsRepository;

/// Domain service with the business rules for the item collection.
/// Depends only on the repository and publisher ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ItemsRepository>,
    events: Arc<dyn EventPublisher<ItemDomainEvent>>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn ItemsRepository>,
        events: Arc<dyn EventPublisher<ItemDomainEvent>>,
    ) -> Self {
        Self { repo, events }
    }

    #[instrument(name = "shopping_list.service.list_items", skip(self))]
    pub async fn list_items(&self) -> Result<Vec<GroceryItem>, DomainError> {
        debug!("Listing items");

        let items = self
            .repo
            .list()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        debug!("Listed {} items", items.len());
        Ok(items)
    }

    #[instrument(
        name = "shopping_list.service.create_item",
        skip(self),
        fields(name = %new_item.name)
    )]
    pub async fn create_item(&self, new_item: NewGroceryItem) -> Result<GroceryItem, DomainError> {
        info!("Creating item");

        let now = Utc::now();
        let item = GroceryItem {
            id: Uuid::new_v4(),
            name: new_item.name,
            quantity: new_item.quantity.unwrap_or(1),
            category: new_item.category.unwrap_or(Category::Other),
            notes: new_item.notes,
            bought: false,
            created_at: now,
            bought_at: None,
        };

        self.repo
            .insert(item.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        self.events.publish(&ItemDomainEvent::Created {
            id: item.id,
            at: item.created_at,
        });

        info!("Created item with id={}", item.id);
        Ok(item)
    }

    #[instrument(
        name = "shopping_list.service.update_item",
        skip(self, patch),
        fields(item_id = %id)
    )]
    pub async fn update_item(
        &self,
        id: Uuid,
        patch: GroceryItemPatch,
    ) -> Result<GroceryItem, DomainError> {
        info!("Updating item");

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::item_not_found(id))?;

        let now = Utc::now();

        // bought_at tracks actual transitions only; re-sending the current
        // value must not touch it.
        let mut transition = None;
        if let Some(bought) = patch.bought {
            if bought != current.bought {
                current.bought_at = bought.then_some(now);
                transition = Some(bought);
            }
            current.bought = bought;
        }
        if let Some(quantity) = patch.quantity {
            current.quantity = quantity;
        }
        if let Some(notes) = patch.notes {
            current.notes = Some(notes);
        }

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        self.events.publish(&ItemDomainEvent::Updated { id, at: now });
        match transition {
            Some(true) => self
                .events
                .publish(&ItemDomainEvent::CheckedOff { id, at: now }),
            Some(false) => self
                .events
                .publish(&ItemDomainEvent::Unchecked { id, at: now }),
            None => {}
        }

        info!("Updated item");
        Ok(current)
    }

    #[instrument(
        name = "shopping_list.service.delete_item",
        skip(self),
        fields(item_id = %id)
    )]
    pub async fn delete_item(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting item");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if !deleted {
            return Err(DomainError::item_not_found(id));
        }

        self.events
            .publish(&ItemDomainEvent::Deleted { id, at: Utc::now() });

        info!("Deleted item");
        Ok(())
    }

    #[instrument(name = "shopping_list.service.clear_bought", skip(self))]
    pub async fn clear_bought(&self) -> Result<u64, DomainError> {
        info!("Clearing bought items");

        let removed = self
            .repo
            .delete_bought()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        self.events.publish(&ItemDomainEvent::BoughtCleared {
            removed,
            at: Utc::now(),
        });

        info!("Cleared {} bought items", removed);
        Ok(removed)
    }
}
