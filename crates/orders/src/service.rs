use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediforge_core::{DomainError, DomainResult, ItemId, OrderId, PatientId};
use mediforge_inventory::InventoryItem;
use mediforge_patients::Patient;
use mediforge_store::KeyedStore;

use crate::order::{Order, OrderStatus};

/// Denormalized order view: order fields plus display data resolved from the
/// referenced patient and item.
///
/// The resolved fields are `None` when the referenced entity has since been
/// removed; the order itself keeps listing (identity references only, no
/// cascade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub patient_id: PatientId,
    pub item_id: ItemId,
    pub quantity: u32,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub item_name: Option<String>,
}

/// Partial update: only fields present in the request are replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderChange {
    pub quantity: Option<u32>,
    pub status: Option<OrderStatus>,
}

/// Order manager: placement, listing and status transitions.
///
/// Placement does not debit the item's quantity on hand; fulfilment adjusts
/// inventory through the inventory manager separately.
#[derive(Debug)]
pub struct OrderService<O, P, I>
where
    O: KeyedStore<OrderId, Order>,
    P: KeyedStore<PatientId, Patient>,
    I: KeyedStore<ItemId, InventoryItem>,
{
    orders: O,
    patients: P,
    items: I,
}

impl<O, P, I> OrderService<O, P, I>
where
    O: KeyedStore<OrderId, Order>,
    P: KeyedStore<PatientId, Patient>,
    I: KeyedStore<ItemId, InventoryItem>,
{
    pub fn new(orders: O, patients: P, items: I) -> Self {
        Self {
            orders,
            patients,
            items,
        }
    }

    /// Place a new order for an authenticated patient.
    ///
    /// Both references must resolve; the order starts `Pending` with a fresh
    /// order date.
    pub fn place_order(
        &self,
        patient_id: PatientId,
        item_id: ItemId,
        quantity: u32,
    ) -> DomainResult<OrderView> {
        if quantity == 0 {
            return Err(DomainError::invalid_argument("order quantity must be at least 1"));
        }

        let patient = self.patients.get(&patient_id)?.ok_or_else(|| {
            DomainError::invalid_reference(format!("patient {patient_id} does not exist"))
        })?;
        let item = self.items.get(&item_id)?.ok_or_else(|| {
            DomainError::invalid_reference(format!("inventory item {item_id} does not exist"))
        })?;

        let order = Order {
            id: OrderId::new(),
            patient_id,
            item_id,
            quantity,
            order_date: Utc::now(),
            status: OrderStatus::Pending,
        };
        self.orders.upsert(order.id, order.clone())?;
        tracing::info!(
            order_id = %order.id,
            patient_id = %patient_id,
            item_id = %item_id,
            quantity,
            "order placed"
        );

        Ok(denormalize(&order, Some(&patient), Some(&item)))
    }

    /// All orders referencing a patient, with display data eagerly resolved.
    pub fn orders_for_patient(&self, patient_id: PatientId) -> DomainResult<Vec<OrderView>> {
        self.orders
            .list()?
            .iter()
            .filter(|o| o.patient_id == patient_id)
            .map(|o| self.resolve_view(o))
            .collect()
    }

    /// Every order, newest first.
    pub fn list_all(&self) -> DomainResult<Vec<OrderView>> {
        let mut orders = self.orders.list()?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        orders.iter().map(|o| self.resolve_view(o)).collect()
    }

    /// Apply a partial update; absent fields are left untouched.
    pub fn update_order(&self, order_id: OrderId, change: OrderChange) -> DomainResult<OrderView> {
        let mut order = self.orders.get(&order_id)?.ok_or(DomainError::NotFound)?;

        if let Some(quantity) = change.quantity {
            if quantity == 0 {
                return Err(DomainError::invalid_argument("order quantity must be at least 1"));
            }
            order.quantity = quantity;
        }
        if let Some(status) = change.status {
            order.status = status;
        }

        self.orders.upsert(order_id, order.clone())?;
        tracing::info!(order_id = %order_id, status = %order.status, "order updated");

        self.resolve_view(&order)
    }

    pub fn remove_order(&self, order_id: OrderId) -> DomainResult<()> {
        self.orders.remove(&order_id)?.ok_or(DomainError::NotFound)?;
        tracing::info!(order_id = %order_id, "order removed");
        Ok(())
    }

    fn resolve_view(&self, order: &Order) -> DomainResult<OrderView> {
        let patient = self.patients.get(&order.patient_id)?;
        let item = self.items.get(&order.item_id)?;
        Ok(denormalize(order, patient.as_ref(), item.as_ref()))
    }
}

fn denormalize(order: &Order, patient: Option<&Patient>, item: Option<&InventoryItem>) -> OrderView {
    OrderView {
        order_id: order.id,
        patient_id: order.patient_id,
        item_id: order.item_id,
        quantity: order.quantity,
        order_date: order.order_date,
        status: order.status.clone(),
        patient_name: patient.map(Patient::full_name),
        patient_email: patient.map(|p| p.email.clone()),
        patient_phone: patient.map(|p| p.phone_number.clone()),
        item_name: item.map(|i| i.name.clone()),
    }
}
