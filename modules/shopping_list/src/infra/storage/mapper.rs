use sea_orm::Set;

use crate::contract::model::{Category, GroceryItem};
use crate::infra::storage::entity::{ActiveModel, Model};

/// Convert a database row to the contract model.
pub fn entity_to_contract(entity: Model) -> GroceryItem {
    GroceryItem {
        id: entity.id,
        name: entity.name,
        // The column is a plain signed integer; clamp rather than wrap.
        quantity: entity.quantity.max(0) as u32,
        category: Category::parse(&entity.category),
        notes: entity.notes,
        bought: entity.bought,
        created_at: entity.created_at,
        bought_at: entity.bought_at,
    }
}

/// Build an active model with every column set, for insert or update-by-pk.
pub fn contract_to_active(item: GroceryItem) -> ActiveModel {
    ActiveModel {
        id: Set(item.id),
        name: Set(item.name),
        quantity: Set(item.quantity.min(i32::MAX as u32) as i32),
        category: Set(item.category.as_str().to_string()),
        notes: Set(item.notes),
        bought: Set(item.bought),
        created_at: Set(item.created_at),
        bought_at: Set(item.bought_at),
    }
}
