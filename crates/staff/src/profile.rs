use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mediforge_core::{AccountId, DomainError, DomainResult, StaffId};

/// Employment profile paired with an authentication account.
///
/// # Invariants
/// - Every profile has exactly one paired account, linked by `account_id` and
///   sharing the login email.
/// - `password` mirrors the paired account's credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: StaffId,
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    /// Login email; immutable after registration (it keys the paired account).
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
    pub password: String,
}

/// Registration input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffDraft {
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
    pub password: String,
}

/// Full replacement of the mutable profile fields. The email is not part of
/// the update surface; a blank or absent password leaves credentials alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub first_name: String,
    pub last_name: String,
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
    pub password: Option<String>,
}

/// Phone format shared by the HTTP boundary: 10-15 digits, optional leading +.
pub(crate) fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

fn require_non_blank(value: &str, field: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(format!("{field} is required")));
    }
    Ok(())
}

impl StaffDraft {
    pub fn validate(&self) -> DomainResult<()> {
        self.as_update().validate()?;
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::invalid_argument("invalid email format"));
        }
        if self.password.len() < 8 {
            return Err(DomainError::invalid_argument(
                "password must be at least 8 characters long",
            ));
        }
        Ok(())
    }

    /// The draft seen as a full field replacement (registration applies the
    /// same field rules an update does).
    fn as_update(&self) -> StaffUpdate {
        StaffUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            date_of_birth: self.date_of_birth,
            hire_date: self.hire_date,
            salary: self.salary,
            emergency_contact: self.emergency_contact.clone(),
            emergency_phone: self.emergency_phone.clone(),
            password: None,
        }
    }
}

impl StaffUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank(&self.first_name, "first name")?;
        require_non_blank(&self.last_name, "last name")?;
        require_non_blank(&self.role, "role")?;
        require_non_blank(&self.department, "department")?;
        require_non_blank(&self.address, "address")?;
        require_non_blank(&self.city, "city")?;
        require_non_blank(&self.state, "state")?;
        if !is_valid_phone(&self.phone_number) {
            return Err(DomainError::invalid_argument("invalid phone number format"));
        }
        if self.salary <= Decimal::ZERO {
            return Err(DomainError::invalid_argument("salary must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> StaffDraft {
        StaffDraft {
            first_name: "Ngozi".to_string(),
            last_name: "Eze".to_string(),
            email: "ngozi@hospital.org".to_string(),
            phone_number: "+2348012345678".to_string(),
            role: "Nurse".to_string(),
            department: "Pediatrics".to_string(),
            address: "4 Marina Rd".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 2, 3).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2020, 7, 1).unwrap(),
            salary: Decimal::new(250_000, 2),
            emergency_contact: None,
            emergency_phone: None,
            password: "long-enough".to_string(),
        }
    }

    #[test]
    fn well_formed_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn phone_format_is_enforced() {
        assert!(is_valid_phone("0712345678"));
        assert!(is_valid_phone("+2348012345678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("07-1234-5678"));
        assert!(!is_valid_phone("+0123456789012345"));

        let mut bad = draft();
        bad.phone_number = "12345".to_string();
        assert!(matches!(bad.validate(), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut bad = draft();
        bad.department = "  ".to_string();
        assert!(matches!(bad.validate(), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn non_positive_salary_is_rejected() {
        let mut bad = draft();
        bad.salary = Decimal::ZERO;
        assert!(matches!(bad.validate(), Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn short_password_is_rejected() {
        let mut bad = draft();
        bad.password = "short".to_string();
        assert!(matches!(bad.validate(), Err(DomainError::InvalidArgument(_))));
    }
}
