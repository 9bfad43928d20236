//! Field-level input validation for DTOs.
//!
//! Rules:
//! - Names are letters with single internal spaces. Length bounds are
//!   2..=30 for employees, 2..=10 for departments, 2..=20 for sports.
//! - Zip is six digits with a non-zero lead, or `dddd ddd`.
//! - Date of birth must be strictly in the past.

use super::{DepartmentDto, EmployeeDto, SportDto};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+( [a-zA-Z]+)*$").expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
static ZIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[1-9][0-9]{5}|[1-9][0-9]{3}\s[0-9]{3})$").expect("valid zip regex")
});

const EMPLOYEE_NAME_LEN: (usize, usize) = (2, 30);
const DEPARTMENT_NAME_LEN: (usize, usize) = (2, 10);
const SPORT_NAME_LEN: (usize, usize) = (2, 20);

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors found in one DTO.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", render_field_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn render_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Returns whether `field` was rejected.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn name(&mut self, field: &'static str, value: &str, (min, max): (usize, usize)) {
        if value.trim().is_empty() {
            self.push(field, "Name is Required");
            return;
        }
        let len = value.chars().count();
        if len < min || len > max {
            self.push(
                field,
                format!("Name should be between {min} and {max} characters"),
            );
        }
        if !NAME_RE.is_match(value) {
            self.push(field, "Name should be alphabets");
        }
    }

    fn required(&mut self, field: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, format!("{label} is Required"));
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

impl DepartmentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut collector = Collector::default();
        collector.name("name", &self.name, DEPARTMENT_NAME_LEN);
        collector.finish()
    }
}

impl SportDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut collector = Collector::default();
        collector.name("name", &self.name, SPORT_NAME_LEN);
        collector.finish()
    }
}

impl EmployeeDto {
    /// Validates against the current local date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Validates with an explicit "today" for the date-of-birth check.
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), ValidationError> {
        let mut collector = Collector::default();
        collector.name("name", &self.name, EMPLOYEE_NAME_LEN);

        if self.dob >= today {
            collector.push("dob", "Date of Birth must be past");
        }

        if self.email.trim().is_empty() {
            collector.push("emailId", "Email ID is Required");
        } else if !EMAIL_RE.is_match(&self.email) {
            collector.push("emailId", "Email ID is not valid");
        }

        if self.department_id <= 0 {
            collector.push("departmentID", "Department ID is Required");
        }

        collector.required("street", "Street", &self.street);
        collector.required("city", "City", &self.city);
        collector.required("state", "State", &self.state);
        if self.zip.trim().is_empty() {
            collector.push("zip", "Zip is Required");
        } else if !ZIP_RE.is_match(&self.zip) {
            collector.push("zip", "Zip is not valid");
        }

        collector.finish()
    }
}
