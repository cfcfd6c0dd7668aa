use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediforge_core::{AccountId, DomainError, DomainResult};

use crate::Role;

/// Authentication record paired with a profile (staff, patient, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    /// Login email, stored lowercased.
    pub email: String,
    /// Opaque credential; hashing happens upstream of this directory.
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Directory of authentication records keyed by login email.
pub trait AccountDirectory: Send + Sync {
    /// Create a record; a taken email is a distinct failure.
    fn create(&self, email: &str, password: &str, role: Role) -> DomainResult<AccountRecord>;

    fn find_by_email(&self, email: &str) -> DomainResult<Option<AccountRecord>>;

    /// Replace the stored credential for an existing record.
    fn update_password(&self, email: &str, new_password: &str) -> DomainResult<AccountRecord>;

    /// Remove a record, returning it if one existed. Used as the compensating
    /// step when profile persistence fails mid-registration.
    fn remove(&self, email: &str) -> DomainResult<Option<AccountRecord>>;
}

impl<D> AccountDirectory for Arc<D>
where
    D: AccountDirectory + ?Sized,
{
    fn create(&self, email: &str, password: &str, role: Role) -> DomainResult<AccountRecord> {
        (**self).create(email, password, role)
    }

    fn find_by_email(&self, email: &str) -> DomainResult<Option<AccountRecord>> {
        (**self).find_by_email(email)
    }

    fn update_password(&self, email: &str, new_password: &str) -> DomainResult<AccountRecord> {
        (**self).update_password(email, new_password)
    }

    fn remove(&self, email: &str) -> DomainResult<Option<AccountRecord>> {
        (**self).remove(email)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn poisoned() -> DomainError {
    DomainError::internal("account directory lock poisoned")
}

/// In-memory account directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    inner: RwLock<HashMap<String, AccountRecord>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn create(&self, email: &str, password: &str, role: Role) -> DomainResult<AccountRecord> {
        let email = normalize(email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::invalid_argument("invalid email format"));
        }

        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(&email) {
            return Err(DomainError::duplicate_email(email));
        }

        let record = AccountRecord {
            id: AccountId::new(),
            email: email.clone(),
            password: password.to_string(),
            role,
            created_at: Utc::now(),
        };
        map.insert(email, record.clone());
        tracing::info!(account_id = %record.id, email = %record.email, "account created");

        Ok(record)
    }

    fn find_by_email(&self, email: &str) -> DomainResult<Option<AccountRecord>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&normalize(email)).cloned())
    }

    fn update_password(&self, email: &str, new_password: &str) -> DomainResult<AccountRecord> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let record = map.get_mut(&normalize(email)).ok_or(DomainError::NotFound)?;
        record.password = new_password.to_string();
        Ok(record.clone())
    }

    fn remove(&self, email: &str) -> DomainResult<Option<AccountRecord>> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(&normalize(email)))
    }
}
