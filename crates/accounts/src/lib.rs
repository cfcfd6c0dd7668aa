//! Account directory collaborator: authentication records keyed by login
//! email. Credential hashing is the authentication layer's concern; this crate
//! stores whatever opaque credential it is handed.

pub mod directory;
pub mod roles;

pub use directory::{AccountDirectory, AccountRecord, InMemoryAccountDirectory};
pub use roles::Role;
