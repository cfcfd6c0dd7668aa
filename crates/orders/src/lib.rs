//! Patient orders against the inventory catalog.
//!
//! Orders reference patients and inventory items by identity only; the
//! manager denormalizes display fields into its response views at read time.

pub mod order;
pub mod service;

pub use order::{Order, OrderStatus};
pub use service::{OrderChange, OrderService, OrderView};
