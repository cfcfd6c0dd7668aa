use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediforge_core::{ItemId, OrderId, PatientId};

/// Order fulfilment status.
///
/// The set is open: the manager assigns `Pending` at placement and accepts any
/// caller-supplied value afterwards without enforcing a transition graph.
/// Unknown values round-trip verbatim through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => OrderStatus::Pending,
            "COMPLETED" => OrderStatus::Completed,
            "CANCELLED" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A patient order drawing on the inventory catalog.
///
/// References are by identity only: deleting an order never touches the
/// patient or item it points at, and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub patient_id: PatientId,
    pub item_id: ItemId,
    pub quantity: u32,
    /// Set at placement, immutable afterwards.
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}
