//! Inventory domain module.
//!
//! This crate contains the medicine/consumable catalog: the stock
//! classification rules and the manager that enforces catalog invariants
//! against a key-indexed store.

pub mod item;
pub mod service;

pub use item::{classify, InventoryItem, ItemDraft, StockStatus};
pub use service::{
    InventoryDashboard, InventoryService, ItemView, DASHBOARD_EXPIRY_WINDOW_DAYS,
};
