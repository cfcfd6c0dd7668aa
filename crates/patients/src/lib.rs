//! Patient directory collaborator: the registry the order manager resolves
//! patient references against.

pub mod patient;

pub use patient::{Patient, PatientDirectory, PatientDraft};
