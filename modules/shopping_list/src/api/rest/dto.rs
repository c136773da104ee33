use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::contract::model::{Category, GroceryItem, GroceryItemPatch, NewGroceryItem};

/// REST DTO for a grocery item with serde/utoipa.
///
/// `category` travels as a plain string; unknown names are stored as
/// `other` rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    /// One of `produce|dairy|bakery|meat|frozen|pantry|other`.
    #[schema(example = "produce")]
    pub category: String,
    pub notes: Option<String>,
    pub bought: bool,
    pub created_at: DateTime<Utc>,
    pub bought_at: Option<DateTime<Utc>>,
}

/// REST DTO for creating an item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemReq {
    pub name: String,
    pub quantity: Option<u32>,
    #[schema(example = "dairy")]
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// REST DTO for updating an item (partial). A field that is absent or null
/// leaves the stored value unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemReq {
    pub bought: Option<bool>,
    pub quantity: Option<u32>,
    pub notes: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<GroceryItem> for ItemDto {
    fn from(item: GroceryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            category: item.category.as_str().to_string(),
            notes: item.notes,
            bought: item.bought,
            created_at: item.created_at,
            bought_at: item.bought_at,
        }
    }
}

impl From<CreateItemReq> for NewGroceryItem {
    fn from(req: CreateItemReq) -> Self {
        Self {
            name: req.name,
            quantity: req.quantity,
            category: req.category.as_deref().map(Category::parse),
            notes: req.notes,
        }
    }
}

impl From<UpdateItemReq> for GroceryItemPatch {
    fn from(req: UpdateItemReq) -> Self {
        Self {
            bought: req.bought,
            quantity: req.quantity,
            notes: req.notes,
        }
    }
}
