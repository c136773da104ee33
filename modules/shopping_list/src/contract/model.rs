use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Store sections a grocery item can belong to.
///
/// Unknown names parse to `Other` instead of failing; the API never rejects
/// a category string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Produce,
    Dairy,
    Bakery,
    Meat,
    Frozen,
    Pantry,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Produce,
        Category::Dairy,
        Category::Bakery,
        Category::Meat,
        Category::Frozen,
        Category::Pantry,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Bakery => "bakery",
            Category::Meat => "meat",
            Category::Frozen => "frozen",
            Category::Pantry => "pantry",
            Category::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "produce" => Category::Produce,
            "dairy" => Category::Dairy,
            "bakery" => Category::Bakery,
            "meat" => Category::Meat,
            "frozen" => Category::Frozen,
            "pantry" => Category::Pantry,
            _ => Category::Other,
        }
    }
}

/// Pure grocery-item model (no serde; wire and storage schemas live in the
/// api and infra layers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub category: Category,
    pub notes: Option<String>,
    pub bought: bool,
    pub created_at: DateTime<Utc>,
    /// Set when `bought` transitions false→true, cleared on true→false.
    pub bought_at: Option<DateTime<Utc>>,
}

/// Data for creating a new item; the service fills id, timestamps and
/// defaults (quantity 1, category `other`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGroceryItem {
    pub name: String,
    pub quantity: Option<u32>,
    pub category: Option<Category>,
    pub notes: Option<String>,
}

/// Partial update; only present fields are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroceryItemPatch {
    pub bought: Option<bool>,
    pub quantity: Option<u32>,
    pub notes: Option<String>,
}
