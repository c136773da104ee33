//! Grocery-item module: contract types, domain service, storage adapters and
//! the REST surface for `/api/items`.

// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::model;

// === INTERNAL MODULES ===
// Exposed for the server binary and for tests; the `contract` module is the
// stable surface.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
