//! Staff management: employment profiles paired one-to-one with
//! authentication accounts.
//!
//! Registration creates both halves of the pair as a two-step saga; password
//! changes on a profile propagate to the paired account.

pub mod profile;
pub mod service;

pub use profile::{StaffDraft, StaffProfile, StaffUpdate};
pub use service::{StaffService, StaffView, STAFF_ROLE};
