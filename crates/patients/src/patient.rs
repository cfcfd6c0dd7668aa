use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mediforge_core::{DomainError, DomainResult, PatientId};
use mediforge_store::KeyedStore;

/// Patient registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    /// Unique within the directory, stored lowercased.
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub active: bool,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for registering a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl PatientDraft {
    fn validate(&self) -> DomainResult<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(DomainError::invalid_argument("patient name cannot be empty"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::invalid_argument("invalid email format"));
        }
        if self.phone_number.trim().is_empty() {
            return Err(DomainError::invalid_argument("phone number cannot be empty"));
        }
        Ok(())
    }
}

/// Patient directory: registration and lookups by id or email.
#[derive(Debug)]
pub struct PatientDirectory<S>
where
    S: KeyedStore<PatientId, Patient>,
{
    store: S,
}

impl<S> PatientDirectory<S>
where
    S: KeyedStore<PatientId, Patient>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn register(&self, draft: PatientDraft) -> DomainResult<Patient> {
        draft.validate()?;

        let email = draft.email.trim().to_lowercase();
        if self.find_by_email(&email)?.is_some() {
            return Err(DomainError::duplicate_email(email));
        }

        let patient = Patient {
            id: PatientId::new(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email,
            phone_number: draft.phone_number,
            gender: draft.gender,
            date_of_birth: draft.date_of_birth,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            country: draft.country,
            registered_at: Utc::now(),
            active: true,
        };
        self.store.upsert(patient.id, patient.clone())?;
        tracing::info!(patient_id = %patient.id, "patient registered");

        Ok(patient)
    }

    pub fn patient(&self, id: PatientId) -> DomainResult<Patient> {
        self.store.get(&id)?.ok_or(DomainError::NotFound)
    }

    pub fn find_by_email(&self, email: &str) -> DomainResult<Option<Patient>> {
        let needle = email.trim().to_lowercase();
        Ok(self.store.list()?.into_iter().find(|p| p.email == needle))
    }

    pub fn list_all(&self) -> DomainResult<Vec<Patient>> {
        Ok(self.store.list()?)
    }

    /// Mark a patient inactive without deleting the record (orders keep
    /// resolving against it).
    pub fn deactivate(&self, id: PatientId) -> DomainResult<Patient> {
        let mut patient = self.store.get(&id)?.ok_or(DomainError::NotFound)?;
        patient.active = false;
        self.store.upsert(id, patient.clone())?;
        tracing::info!(patient_id = %id, "patient deactivated");
        Ok(patient)
    }
}
