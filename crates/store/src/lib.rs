//! Durable key-indexed storage abstractions.
//!
//! Managers are written against [`KeyedStore`] so the backing technology stays
//! swappable; [`InMemoryStore`] is the dev/test implementation.

pub mod keyed;

pub use keyed::{InMemoryStore, KeyedStore, StoreError, StoreResult};
