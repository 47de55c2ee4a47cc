//! Field-level checks for incoming student payloads.
//!
//! Every field is checked; violations are collected into one map keyed by the
//! wire field name. A field reports at most one message: the first rule it
//! breaks, in the order listed for that field.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use email_address::{EmailAddress, Options};
use models::student::NewStudent;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::domain::StudentDto;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 50;
/// Width of the `email` column.
pub const EMAIL_MAX_LEN: usize = 255;

static STUDENT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{6}$").expect("valid student id regex"));
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid name regex"));

/// Field name -> human-readable violation message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

    pub fn fields(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn into_inner(self) -> BTreeMap<String, String> { self.0 }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join(", "))
    }
}

fn blank(v: &Option<String>) -> Option<&str> {
    match v.as_deref() {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

fn check_name(errors: &mut ValidationErrors, field: &str, label: &str, value: &Option<String>) -> Option<String> {
    let Some(v) = blank(value) else {
        errors.add(field, format!("{label} is required"));
        return None;
    };
    let len = v.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        errors.add(field, format!("{label} must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"));
        return None;
    }
    if !NAME_RE.is_match(v) {
        errors.add(field, format!("{label} must contain only letters"));
        return None;
    }
    Some(v.to_string())
}

fn check_email(errors: &mut ValidationErrors, value: &Option<String>) -> Option<String> {
    let Some(v) = blank(value) else {
        errors.add("email", "Email is required");
        return None;
    };
    // Bare addresses only: "John <john@example.com>" names the same mailbox
    // under a different string and would slip past the unique index.
    if EmailAddress::parse_with_options(v, Options::default().without_display_text()).is_err() {
        errors.add("email", "Invalid email format");
        return None;
    }
    if v.chars().count() > EMAIL_MAX_LEN {
        errors.add("email", format!("Email must be at most {EMAIL_MAX_LEN} characters"));
        return None;
    }
    Some(v.to_string())
}

fn check_date_of_birth(errors: &mut ValidationErrors, value: Option<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
    let Some(d) = value else {
        errors.add("dateOfBirth", "Date of birth is required");
        return None;
    };
    if d >= today {
        errors.add("dateOfBirth", "Date of birth must be in the past");
        return None;
    }
    Some(d)
}

fn check_student_id(errors: &mut ValidationErrors, value: &Option<String>) -> Option<String> {
    let Some(v) = blank(value) else {
        errors.add("studentId", "Student ID is required");
        return None;
    };
    if !STUDENT_ID_RE.is_match(v) {
        errors.add("studentId", "Student ID must be in format: XX123456");
        return None;
    }
    Some(v.to_string())
}

/// Check `dto` against all field rules, with `today` as the cut-off for the
/// date of birth. On success returns the six mutable fields; `dto.id` is never read.
pub fn validate_at(dto: &StudentDto, today: NaiveDate) -> Result<NewStudent, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let first_name = check_name(&mut errors, "firstName", "First name", &dto.first_name);
    let last_name = check_name(&mut errors, "lastName", "Last name", &dto.last_name);
    let email = check_email(&mut errors, &dto.email);
    let date_of_birth = check_date_of_birth(&mut errors, dto.date_of_birth, today);
    let status = dto.status;
    if status.is_none() {
        errors.add("status", "Status is required");
    }
    let student_id = check_student_id(&mut errors, &dto.student_id);

    match (first_name, last_name, email, date_of_birth, status, student_id) {
        (Some(first_name), Some(last_name), Some(email), Some(date_of_birth), Some(status), Some(student_id))
            if errors.is_empty() =>
        {
            Ok(NewStudent { first_name, last_name, email, date_of_birth, status, student_id })
        }
        _ => Err(errors),
    }
}

/// [`validate_at`] against the current UTC date.
pub fn validate(dto: &StudentDto) -> Result<NewStudent, ValidationErrors> {
    validate_at(dto, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::student::StudentStatus;

    fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

    fn john() -> StudentDto {
        StudentDto {
            id: None,
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            email: Some("john.doe@example.com".into()),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
            status: Some(StudentStatus::Active),
            student_id: Some("ST123456".into()),
        }
    }

    #[test]
    fn valid_payload_yields_fields() {
        let new = validate_at(&john(), today()).unwrap();
        assert_eq!(new.first_name, "John");
        assert_eq!(new.last_name, "Doe");
        assert_eq!(new.email, "john.doe@example.com");
        assert_eq!(new.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(new.status, StudentStatus::Active);
        assert_eq!(new.student_id, "ST123456");
    }

    #[test]
    fn reports_every_broken_field_at_once() {
        let dto = StudentDto {
            first_name: Some("J".into()),
            email: Some("not-an-email".into()),
            date_of_birth: NaiveDate::from_ymd_opt(2030, 1, 1),
            student_id: Some("st123456".into()),
            ..john()
        };
        let errs = validate_at(&dto, today()).unwrap_err();
        assert_eq!(errs.len(), 4);
        assert_eq!(errs.get("firstName"), Some("First name must be between 2 and 50 characters"));
        assert_eq!(errs.get("email"), Some("Invalid email format"));
        assert_eq!(errs.get("dateOfBirth"), Some("Date of birth must be in the past"));
        assert_eq!(errs.get("studentId"), Some("Student ID must be in format: XX123456"));
    }

    #[test]
    fn empty_payload_reports_required_fields() {
        let errs = validate_at(&StudentDto::default(), today()).unwrap_err();
        let fields: Vec<&str> = errs.fields().collect();
        assert_eq!(fields, vec!["dateOfBirth", "email", "firstName", "lastName", "status", "studentId"]);
        assert_eq!(errs.get("firstName"), Some("First name is required"));
        assert_eq!(errs.get("lastName"), Some("Last name is required"));
        assert_eq!(errs.get("email"), Some("Email is required"));
        assert_eq!(errs.get("dateOfBirth"), Some("Date of birth is required"));
        assert_eq!(errs.get("status"), Some("Status is required"));
        assert_eq!(errs.get("studentId"), Some("Student ID is required"));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let dto = StudentDto { last_name: Some("   ".into()), email: Some("".into()), ..john() };
        let errs = validate_at(&dto, today()).unwrap_err();
        assert_eq!(errs.get("lastName"), Some("Last name is required"));
        assert_eq!(errs.get("email"), Some("Email is required"));
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn name_length_bounds_are_inclusive() {
        let ok = StudentDto { first_name: Some("Al".into()), last_name: Some("x".repeat(50)), ..john() };
        assert!(validate_at(&ok, today()).is_ok());
        let too_long = StudentDto { last_name: Some("x".repeat(51)), ..john() };
        let errs = validate_at(&too_long, today()).unwrap_err();
        assert_eq!(errs.get("lastName"), Some("Last name must be between 2 and 50 characters"));
    }

    #[test]
    fn names_must_be_alphabetic() {
        let dto = StudentDto { first_name: Some("J0hn".into()), ..john() };
        let errs = validate_at(&dto, today()).unwrap_err();
        assert_eq!(errs.get("firstName"), Some("First name must contain only letters"));
    }

    #[test]
    fn email_with_display_name_is_rejected() {
        for bad in ["John <john@example.com>", "John Doe <john.doe@example.com>", "<john@example.com>"] {
            let dto = StudentDto { email: Some(bad.into()), ..john() };
            let errs = validate_at(&dto, today()).unwrap_err();
            assert_eq!(errs.get("email"), Some("Invalid email format"), "{bad} should be rejected");
        }
    }

    #[test]
    fn email_must_fit_the_column() {
        let local = "a".repeat(64);
        let domain = format!("{}.{}.{}.com", "b".repeat(63), "c".repeat(63), "d".repeat(63));
        let long = format!("{local}@{domain}");
        assert!(long.len() > EMAIL_MAX_LEN);
        let dto = StudentDto { email: Some(long), ..john() };
        let errs = validate_at(&dto, today()).unwrap_err();
        assert_eq!(errs.get("email"), Some("Email must be at most 255 characters"));

        let fits = format!("{}@{}.com", "a".repeat(64), "b".repeat(63));
        let dto = StudentDto { email: Some(fits), ..john() };
        assert!(validate_at(&dto, today()).is_ok());
    }

    #[test]
    fn date_of_birth_today_is_not_past() {
        let dto = StudentDto { date_of_birth: Some(today()), ..john() };
        assert!(validate_at(&dto, today()).is_err());
        let dto = StudentDto { date_of_birth: today().pred_opt(), ..john() };
        assert!(validate_at(&dto, today()).is_ok());
    }

    #[test]
    fn student_id_pattern() {
        for bad in ["ST12345", "ST1234567", "S1234567", "ST12345a", "ST１２３４５６"] {
            let dto = StudentDto { student_id: Some(bad.into()), ..john() };
            assert!(validate_at(&dto, today()).is_err(), "{bad} should be rejected");
        }
        let dto = StudentDto { student_id: Some("AB000001".into()), ..john() };
        assert!(validate_at(&dto, today()).is_ok());
    }

    #[test]
    fn supplied_id_does_not_matter() {
        let dto = StudentDto { id: Some(42), ..john() };
        assert!(validate_at(&dto, today()).is_ok());
    }
}
