//! External representations exchanged with request boundaries.
//!
//! # Responsibility
//! - Define the DTO shapes callers send and receive.
//! - Provide field-level validation run before any policy is invoked.
//!
//! # Invariants
//! - `id == 0` on input means "not assigned"; it is ignored on create.
//! - `age`, `department_name` and `sports` are output-only on employees.

use crate::model::department::DepartmentId;
use crate::model::employee::EmployeeId;
use crate::model::sport::SportId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod validation;

pub use validation::{FieldError, ValidationError};

/// External representation of a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDto {
    #[serde(default)]
    pub id: DepartmentId,
    pub name: String,
}

impl DepartmentDto {
    /// Builds an input DTO carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

/// External representation of a sport, also used as the `(id, name)`
/// summary nested in employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportDto {
    #[serde(default)]
    pub id: SportId,
    pub name: String,
}

impl SportDto {
    /// Builds an input DTO carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

/// External representation of an employee with its address flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default)]
    pub id: EmployeeId,
    pub name: String,
    pub dob: NaiveDate,
    /// Derived from `dob` at translation time.
    #[serde(default)]
    pub age: u32,
    #[serde(rename = "emailId")]
    pub email: String,
    #[serde(rename = "departmentID")]
    pub department_id: DepartmentId,
    #[serde(default)]
    pub department_name: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Sorted by sport id.
    #[serde(default)]
    pub sports: Vec<SportDto>,
}
