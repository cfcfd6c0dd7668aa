use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mediforge_core::{DomainError, DomainResult, ItemId};
use mediforge_store::KeyedStore;

use crate::item::{InventoryItem, ItemDraft, StockStatus};

/// Expiry horizon used by the dashboard aggregate (policy constant).
pub const DASHBOARD_EXPIRY_WINDOW_DAYS: u32 = 30;

/// Response shape for a catalog entry: stored fields plus the derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
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
    pub stock_status: StockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&InventoryItem> for ItemView {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            category: item.category.clone(),
            supplier: item.supplier.clone(),
            expiry_date: item.expiry_date,
            price: item.price,
            minimum_stock: item.minimum_stock,
            stock_status: item.stock_status(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Dashboard aggregate composed from catalog queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDashboard {
    pub total_items: u64,
    pub out_of_stock_items: u64,
    pub low_stock_items: u64,
    pub expiring_items: u64,
    pub low_stock: Vec<ItemView>,
    pub expiring: Vec<ItemView>,
}

/// Inventory manager: catalog CRUD, stock queries and the dashboard.
///
/// # Invariants
/// - No two items share (name, category).
/// - Quantity never goes negative.
#[derive(Debug)]
pub struct InventoryService<S>
where
    S: KeyedStore<ItemId, InventoryItem>,
{
    store: S,
}

impl<S> InventoryService<S>
where
    S: KeyedStore<ItemId, InventoryItem>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a new catalog entry.
    ///
    /// Rejects drafts whose (name, category) pair is already taken.
    pub fn add_item(&self, draft: ItemDraft) -> DomainResult<ItemView> {
        draft.validate()?;

        let taken = self
            .store
            .list()?
            .iter()
            .any(|i| i.name == draft.name && i.category == draft.category);
        if taken {
            return Err(DomainError::duplicate_item(format!(
                "{} ({})",
                draft.name, draft.category
            )));
        }

        let now = Utc::now();
        let item = InventoryItem {
            id: ItemId::new(),
            name: draft.name,
            description: draft.description,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            supplier: draft.supplier,
            expiry_date: draft.expiry_date,
            price: draft.price,
            minimum_stock: draft.minimum_stock,
            created_at: now,
            updated_at: now,
        };
        self.store.upsert(item.id, item.clone())?;
        tracing::info!(item_id = %item.id, name = %item.name, "inventory item added");

        Ok(ItemView::from(&item))
    }

    /// Fully replace the mutable fields of an existing item.
    ///
    /// The (name, category) uniqueness check is scoped to *other* items, so an
    /// item may keep its own identity across updates.
    pub fn update_item(&self, id: ItemId, draft: ItemDraft) -> DomainResult<ItemView> {
        draft.validate()?;

        let mut item = self.store.get(&id)?.ok_or(DomainError::NotFound)?;

        let taken = self
            .store
            .list()?
            .iter()
            .any(|i| i.id != id && i.name == draft.name && i.category == draft.category);
        if taken {
            return Err(DomainError::duplicate_item(format!(
                "{} ({})",
                draft.name, draft.category
            )));
        }

        item.name = draft.name;
        item.description = draft.description;
        item.quantity = draft.quantity;
        item.unit = draft.unit;
        item.category = draft.category;
        item.supplier = draft.supplier;
        item.expiry_date = draft.expiry_date;
        item.price = draft.price;
        item.minimum_stock = draft.minimum_stock;
        item.updated_at = Utc::now();

        self.store.upsert(id, item.clone())?;
        tracing::info!(item_id = %id, "inventory item updated");

        Ok(ItemView::from(&item))
    }

    pub fn item(&self, id: ItemId) -> DomainResult<ItemView> {
        let item = self.store.get(&id)?.ok_or(DomainError::NotFound)?;
        Ok(ItemView::from(&item))
    }

    pub fn list_all(&self) -> DomainResult<Vec<ItemView>> {
        Ok(self.store.list()?.iter().map(ItemView::from).collect())
    }

    pub fn list_by_category(&self, category: &str) -> DomainResult<Vec<ItemView>> {
        Ok(self
            .store
            .list()?
            .iter()
            .filter(|i| i.category == category)
            .map(ItemView::from)
            .collect())
    }

    pub fn list_by_supplier(&self, supplier: &str) -> DomainResult<Vec<ItemView>> {
        Ok(self
            .store
            .list()?
            .iter()
            .filter(|i| i.supplier.as_deref() == Some(supplier))
            .map(ItemView::from)
            .collect())
    }

    /// Items at or below their configured minimum. Items without a minimum are
    /// never reported low.
    pub fn list_low_stock(&self) -> DomainResult<Vec<ItemView>> {
        Ok(self
            .store
            .list()?
            .iter()
            .filter(|i| i.minimum_stock.is_some_and(|m| i.quantity <= m))
            .map(ItemView::from)
            .collect())
    }

    /// Items whose expiry date falls on or before `date`. Items without an
    /// expiry date are excluded.
    pub fn list_expiring_before(&self, date: NaiveDate) -> DomainResult<Vec<ItemView>> {
        Ok(self
            .store
            .list()?
            .iter()
            .filter(|i| i.expiry_date.is_some_and(|d| d <= date))
            .map(ItemView::from)
            .collect())
    }

    pub fn list_expiring_within_days(&self, days: u32) -> DomainResult<Vec<ItemView>> {
        let cutoff = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| DomainError::invalid_argument("expiry window out of range"))?;
        self.list_expiring_before(cutoff)
    }

    /// Case-insensitive substring search over name and description.
    pub fn search(&self, term: &str) -> DomainResult<Vec<ItemView>> {
        let needle = term.to_lowercase();
        Ok(self
            .store
            .list()?
            .iter()
            .filter(|i| {
                i.name.to_lowercase().contains(&needle)
                    || i.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .map(ItemView::from)
            .collect())
    }

    pub fn remove_item(&self, id: ItemId) -> DomainResult<()> {
        self.store.remove(&id)?.ok_or(DomainError::NotFound)?;
        tracing::info!(item_id = %id, "inventory item removed");
        Ok(())
    }

    /// Set the absolute quantity on hand.
    pub fn set_quantity(&self, id: ItemId, new_quantity: i64) -> DomainResult<ItemView> {
        let mut item = self.store.get(&id)?.ok_or(DomainError::NotFound)?;

        if new_quantity < 0 {
            return Err(DomainError::invalid_argument("quantity cannot be negative"));
        }
        let quantity = u32::try_from(new_quantity)
            .map_err(|_| DomainError::invalid_argument("quantity out of range"))?;

        item.quantity = quantity;
        item.updated_at = Utc::now();
        self.store.upsert(id, item.clone())?;
        tracing::info!(item_id = %id, quantity, "stock quantity set");

        Ok(ItemView::from(&item))
    }

    /// Compose the back-office dashboard from catalog queries.
    pub fn dashboard(&self) -> DomainResult<InventoryDashboard> {
        let all = self.list_all()?;
        let low_stock = self.list_low_stock()?;
        let expiring = self.list_expiring_within_days(DASHBOARD_EXPIRY_WINDOW_DAYS)?;

        let out_of_stock_items = all
            .iter()
            .filter(|i| i.stock_status == StockStatus::OutOfStock)
            .count() as u64;

        Ok(InventoryDashboard {
            total_items: all.len() as u64,
            out_of_stock_items,
            low_stock_items: low_stock.len() as u64,
            expiring_items: expiring.len() as u64,
            low_stock,
            expiring,
        })
    }
}
