use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mediforge_accounts::{AccountDirectory, Role};
use mediforge_core::{DomainError, DomainResult, StaffId};
use mediforge_store::KeyedStore;

use crate::profile::{StaffDraft, StaffProfile, StaffUpdate};

/// Role tag assigned to accounts created through staff registration.
pub const STAFF_ROLE: &str = "STAFF";

/// Response shape for a profile. The credential never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffView {
    pub id: StaffId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub department: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub date_of_birth: NaiveDate,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}

impl From<&StaffProfile> for StaffView {
    fn from(profile: &StaffProfile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            role: profile.role.clone(),
            department: profile.department.clone(),
            address: profile.address.clone(),
            city: profile.city.clone(),
            state: profile.state.clone(),
            date_of_birth: profile.date_of_birth,
            hire_date: profile.hire_date,
            salary: profile.salary,
            emergency_contact: profile.emergency_contact.clone(),
            emergency_phone: profile.emergency_phone.clone(),
        }
    }
}

/// Staff manager: paired-identity registration and profile lifecycle.
#[derive(Debug)]
pub struct StaffService<S, A>
where
    S: KeyedStore<StaffId, StaffProfile>,
    A: AccountDirectory,
{
    profiles: S,
    accounts: A,
}

impl<S, A> StaffService<S, A>
where
    S: KeyedStore<StaffId, StaffProfile>,
    A: AccountDirectory,
{
    pub fn new(profiles: S, accounts: A) -> Self {
        Self { profiles, accounts }
    }

    /// Register a staff member: account first, then the linked profile.
    ///
    /// A taken email fails distinctly before anything is written. If the
    /// profile write fails after the account exists, the account is removed
    /// again (compensating delete) and the whole operation surfaces as an
    /// internal failure.
    pub fn register(&self, draft: StaffDraft) -> DomainResult<StaffView> {
        draft.validate()?;

        let account = self
            .accounts
            .create(&draft.email, &draft.password, Role::new(STAFF_ROLE))?;

        let profile = StaffProfile {
            id: StaffId::new(),
            account_id: account.id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: account.email.clone(),
            phone_number: draft.phone_number,
            role: draft.role,
            department: draft.department,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            date_of_birth: draft.date_of_birth,
            hire_date: draft.hire_date,
            salary: draft.salary,
            emergency_contact: draft.emergency_contact,
            emergency_phone: draft.emergency_phone,
            password: draft.password,
        };

        if let Err(err) = self.profiles.upsert(profile.id, profile.clone()) {
            tracing::warn!(
                email = %profile.email,
                error = %err,
                "profile persistence failed; removing paired account"
            );
            if let Err(comp) = self.accounts.remove(&profile.email) {
                tracing::error!(
                    email = %profile.email,
                    error = %comp,
                    "compensating account removal failed"
                );
            }
            return Err(DomainError::internal(
                "staff registration could not be completed",
            ));
        }

        tracing::info!(staff_id = %profile.id, email = %profile.email, "staff registered");
        Ok(StaffView::from(&profile))
    }

    pub fn fetch_by_email(&self, email: &str) -> DomainResult<StaffView> {
        let profile = self.profile_by_email(email)?;
        Ok(StaffView::from(&profile))
    }

    pub fn fetch_by_id(&self, id: StaffId) -> DomainResult<StaffView> {
        let profile = self.profiles.get(&id)?.ok_or(DomainError::NotFound)?;
        Ok(StaffView::from(&profile))
    }

    pub fn list_all(&self) -> DomainResult<Vec<StaffView>> {
        Ok(self.profiles.list()?.iter().map(StaffView::from).collect())
    }

    pub fn update_by_email(&self, email: &str, update: StaffUpdate) -> DomainResult<StaffView> {
        let profile = self.profile_by_email(email)?;
        self.apply_update(profile, update)
    }

    pub fn update_by_id(&self, id: StaffId, update: StaffUpdate) -> DomainResult<StaffView> {
        let profile = self.profiles.get(&id)?.ok_or(DomainError::NotFound)?;
        self.apply_update(profile, update)
    }

    pub fn delete_by_email(&self, email: &str) -> DomainResult<()> {
        let profile = self.profile_by_email(email)?;
        self.profiles.remove(&profile.id)?;
        tracing::info!(staff_id = %profile.id, "staff profile deleted");
        Ok(())
    }

    pub fn delete_by_id(&self, id: StaffId) -> DomainResult<()> {
        let profile = self.profiles.get(&id)?.ok_or(DomainError::NotFound)?;
        self.profiles.remove(&profile.id)?;
        tracing::info!(staff_id = %profile.id, "staff profile deleted");
        Ok(())
    }

    fn profile_by_email(&self, email: &str) -> DomainResult<StaffProfile> {
        let needle = email.trim().to_lowercase();
        self.profiles
            .list()?
            .into_iter()
            .find(|p| p.email == needle)
            .ok_or(DomainError::NotFound)
    }

    /// Replace the mutable fields; a non-empty password propagates to the
    /// paired account before the profile is persisted.
    fn apply_update(&self, mut profile: StaffProfile, update: StaffUpdate) -> DomainResult<StaffView> {
        update.validate()?;

        profile.first_name = update.first_name;
        profile.last_name = update.last_name;
        profile.phone_number = update.phone_number;
        profile.role = update.role;
        profile.department = update.department;
        profile.address = update.address;
        profile.city = update.city;
        profile.state = update.state;
        profile.date_of_birth = update.date_of_birth;
        profile.hire_date = update.hire_date;
        profile.salary = update.salary;
        profile.emergency_contact = update.emergency_contact;
        profile.emergency_phone = update.emergency_phone;

        if let Some(password) = update.password.as_deref().filter(|p| !p.trim().is_empty()) {
            profile.password = password.to_string();
            self.accounts
                .update_password(&profile.email, password)
                .map_err(|err| match err {
                    DomainError::NotFound => DomainError::internal(format!(
                        "paired account missing for {}",
                        profile.email
                    )),
                    other => other,
                })?;
            tracing::info!(staff_id = %profile.id, "password propagated to paired account");
        }

        self.profiles.upsert(profile.id, profile.clone())?;
        tracing::info!(staff_id = %profile.id, "staff profile updated");

        Ok(StaffView::from(&profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mediforge_accounts::InMemoryAccountDirectory;
    use mediforge_store::{InMemoryStore, KeyedStore, StoreError, StoreResult};

    type Profiles = Arc<InMemoryStore<StaffId, StaffProfile>>;
    type Accounts = Arc<InMemoryAccountDirectory>;

    fn setup() -> (StaffService<Profiles, Accounts>, Profiles, Accounts) {
        let profiles: Profiles = Arc::new(InMemoryStore::new());
        let accounts: Accounts = Arc::new(InMemoryAccountDirectory::new());
        (
            StaffService::new(profiles.clone(), accounts.clone()),
            profiles,
            accounts,
        )
    }

    fn draft(email: &str) -> StaffDraft {
        StaffDraft {
            first_name: "Ngozi".to_string(),
            last_name: "Eze".to_string(),
            email: email.to_string(),
            phone_number: "+2348012345678".to_string(),
            role: "Nurse".to_string(),
            department: "Pediatrics".to_string(),
            address: "4 Marina Rd".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 2, 3).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2020, 7, 1).unwrap(),
            salary: Decimal::new(250_000, 2),
            emergency_contact: Some("Chidi Eze".to_string()),
            emergency_phone: Some("0803456789012".to_string()),
            password: "long-enough".to_string(),
        }
    }

    fn update_from(d: &StaffDraft) -> StaffUpdate {
        StaffUpdate {
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
            phone_number: d.phone_number.clone(),
            role: d.role.clone(),
            department: d.department.clone(),
            address: d.address.clone(),
            city: d.city.clone(),
            state: d.state.clone(),
            date_of_birth: d.date_of_birth,
            hire_date: d.hire_date,
            salary: d.salary,
            emergency_contact: d.emergency_contact.clone(),
            emergency_phone: d.emergency_phone.clone(),
            password: None,
        }
    }

    #[test]
    fn register_creates_paired_account_and_profile() {
        let (service, profiles, accounts) = setup();

        let view = service.register(draft("Ngozi@Hospital.org")).unwrap();
        assert_eq!(view.email, "ngozi@hospital.org");
        assert_eq!(view.role, "Nurse");

        let account = accounts.find_by_email("ngozi@hospital.org").unwrap().unwrap();
        assert_eq!(account.role.as_str(), STAFF_ROLE);
        assert_eq!(account.password, "long-enough");

        let stored = profiles.get(&view.id).unwrap().unwrap();
        assert_eq!(stored.account_id, account.id);
        assert_eq!(stored.password, "long-enough");
    }

    #[test]
    fn duplicate_email_fails_without_an_orphan_profile() {
        let (service, profiles, _accounts) = setup();

        service.register(draft("ngozi@hospital.org")).unwrap();
        let err = service.register(draft("NGOZI@hospital.org")).unwrap_err();

        assert!(matches!(err, DomainError::DuplicateEmail(_)));
        assert_eq!(profiles.list().unwrap().len(), 1);
    }

    #[test]
    fn failed_profile_write_compensates_the_account() {
        struct FailingProfiles;

        impl KeyedStore<StaffId, StaffProfile> for FailingProfiles {
            fn get(&self, _key: &StaffId) -> StoreResult<Option<StaffProfile>> {
                Ok(None)
            }

            fn upsert(&self, _key: StaffId, _value: StaffProfile) -> StoreResult<()> {
                Err(StoreError::Backend("disk full".to_string()))
            }

            fn remove(&self, _key: &StaffId) -> StoreResult<Option<StaffProfile>> {
                Ok(None)
            }

            fn list(&self) -> StoreResult<Vec<StaffProfile>> {
                Ok(Vec::new())
            }
        }

        let accounts: Accounts = Arc::new(InMemoryAccountDirectory::new());
        let service = StaffService::new(FailingProfiles, accounts.clone());

        let err = service.register(draft("ngozi@hospital.org")).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));

        // Compensation removed the half-created account; the email is free.
        assert!(accounts.find_by_email("ngozi@hospital.org").unwrap().is_none());
    }

    #[test]
    fn invalid_draft_writes_nothing() {
        let (service, profiles, accounts) = setup();

        let mut bad = draft("ngozi@hospital.org");
        bad.password = "short".to_string();
        assert!(service.register(bad).is_err());

        assert!(profiles.list().unwrap().is_empty());
        assert!(accounts.find_by_email("ngozi@hospital.org").unwrap().is_none());
    }

    #[test]
    fn fetch_by_email_is_case_insensitive() {
        let (service, _profiles, _accounts) = setup();
        service.register(draft("ngozi@hospital.org")).unwrap();

        let view = service.fetch_by_email("NGOZI@Hospital.org").unwrap();
        assert_eq!(view.first_name, "Ngozi");

        assert_eq!(
            service.fetch_by_email("ghost@hospital.org").unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn update_replaces_fields_and_keeps_email() {
        let (service, _profiles, _accounts) = setup();
        let view = service.register(draft("ngozi@hospital.org")).unwrap();

        let mut update = update_from(&draft("ignored@hospital.org"));
        update.department = "Oncology".to_string();
        update.salary = Decimal::new(300_000, 2);

        let updated = service.update_by_id(view.id, update).unwrap();
        assert_eq!(updated.department, "Oncology");
        assert_eq!(updated.salary, Decimal::new(300_000, 2));
        assert_eq!(updated.email, "ngozi@hospital.org");
    }

    #[test]
    fn non_empty_password_propagates_to_the_paired_account() {
        let (service, profiles, accounts) = setup();
        let view = service.register(draft("ngozi@hospital.org")).unwrap();

        let mut update = update_from(&draft("ngozi@hospital.org"));
        update.password = Some("rotated-credential".to_string());
        service.update_by_email("ngozi@hospital.org", update).unwrap();

        let account = accounts.find_by_email("ngozi@hospital.org").unwrap().unwrap();
        assert_eq!(account.password, "rotated-credential");
        assert_eq!(
            profiles.get(&view.id).unwrap().unwrap().password,
            "rotated-credential"
        );
    }

    #[test]
    fn blank_password_leaves_credentials_untouched() {
        let (service, _profiles, accounts) = setup();
        service.register(draft("ngozi@hospital.org")).unwrap();

        let mut update = update_from(&draft("ngozi@hospital.org"));
        update.password = Some("   ".to_string());
        service.update_by_email("ngozi@hospital.org", update).unwrap();

        let account = accounts.find_by_email("ngozi@hospital.org").unwrap().unwrap();
        assert_eq!(account.password, "long-enough");
    }

    #[test]
    fn delete_of_missing_staff_is_not_found_and_changes_nothing() {
        let (service, profiles, _accounts) = setup();
        service.register(draft("ngozi@hospital.org")).unwrap();

        assert_eq!(
            service.delete_by_id(StaffId::new()).unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(profiles.list().unwrap().len(), 1);
    }

    #[test]
    fn delete_by_email_removes_only_the_profile() {
        let (service, profiles, accounts) = setup();
        service.register(draft("ngozi@hospital.org")).unwrap();

        service.delete_by_email("ngozi@hospital.org").unwrap();

        assert!(profiles.list().unwrap().is_empty());
        // The login record stays; account lifecycle is the directory's concern.
        assert!(accounts.find_by_email("ngozi@hospital.org").unwrap().is_some());
    }

    #[test]
    fn list_all_returns_every_profile() {
        let (service, _profiles, _accounts) = setup();
        service.register(draft("ngozi@hospital.org")).unwrap();
        service.register(draft("chidi@hospital.org")).unwrap();

        assert_eq!(service.list_all().unwrap().len(), 2);
    }
}
