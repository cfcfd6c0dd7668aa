use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mediforge_core::{DomainError, DomainResult, ItemId};

/// Stock classification derived from quantity on hand and the configured
/// minimum. Never stored; recomputed on every read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "In Stock")]
    InStock,
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockStatus::OutOfStock => f.write_str("Out of Stock"),
            StockStatus::LowStock => f.write_str("Low Stock"),
            StockStatus::InStock => f.write_str("In Stock"),
        }
    }
}

/// Classify a stock level.
///
/// An exhausted quantity wins over any minimum-stock configuration; items
/// without a configured minimum are never considered low.
pub fn classify(quantity: u32, minimum_stock: Option<u32>) -> StockStatus {
    if quantity == 0 {
        return StockStatus::OutOfStock;
    }
    match minimum_stock {
        Some(minimum) if quantity <= minimum => StockStatus::LowStock,
        _ => StockStatus::InStock,
    }
}

/// Catalog entry for a medicine or consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit: String,
    pub category: String,
    pub supplier: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub price: Decimal,
    pub minimum_stock: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        classify(self.quantity, self.minimum_stock)
    }
}

/// Mutable fields of an item, used for creation and full replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit: String,
    pub category: String,
    pub supplier: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub price: Decimal,
    pub minimum_stock: Option<u32>,
}

impl ItemDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_argument("name cannot be empty"));
        }
        if self.unit.trim().is_empty() {
            return Err(DomainError::invalid_argument("unit cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::invalid_argument("category cannot be empty"));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::invalid_argument("price must be positive"));
        }
        Ok(())
    }
}
