pub mod model;

pub use model::{Category, GroceryItem, GroceryItemPatch, NewGroceryItem};
