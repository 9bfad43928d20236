//! Employee domain model.
//!
//! # Responsibility
//! - Define the employee record together with its owned address.
//! - Provide the joined read model used by the translation layer.
//!
//! # Invariants
//! - `address` lives and dies with its employee; it is never shared.
//! - `sport_ids` has set semantics: no duplicates, order irrelevant.
//! - Age is never stored; it is derived from `dob` when translated.

use super::department::DepartmentId;
use super::sport::SportId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Store-assigned employee identifier.
pub type EmployeeId = i64;

/// Postal address exclusively owned by one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Canonical employee record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// `None` until the store assigns an identity on first save.
    pub id: Option<EmployeeId>,
    pub name: String,
    pub dob: NaiveDate,
    /// Globally unique; enforced by the store.
    pub email: String,
    /// `false` means soft-deleted.
    pub is_active: bool,
    pub address: Address,
    /// Mandatory many-to-one link.
    pub department_id: DepartmentId,
    /// Optional many-to-many links.
    pub sport_ids: BTreeSet<SportId>,
}

impl Employee {
    /// Creates a new active employee with no department, address or sports.
    ///
    /// Callers are expected to fill `department_id` and `address` before
    /// the record is saved.
    pub fn new(name: impl Into<String>, dob: NaiveDate, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            dob,
            email: email.into(),
            is_active: true,
            address: Address::default(),
            department_id: 0,
            sport_ids: BTreeSet::new(),
        }
    }

    /// Marks this employee as inactive (soft-deleted).
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Returns whether `sport_id` is linked to this employee.
    pub fn has_sport(&self, sport_id: SportId) -> bool {
        self.sport_ids.contains(&sport_id)
    }
}

/// `(id, name)` pair summarizing one linked sport.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SportSummary {
    pub id: SportId,
    pub name: String,
}

/// Read model for employee detail/list use-cases.
///
/// Carries the denormalized department name and sport summaries joined by
/// the store at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee: Employee,
    /// `None` only when the referenced department row is missing.
    pub department_name: Option<String>,
    /// Sorted by sport id.
    pub sports: Vec<SportSummary>,
}

impl EmployeeRecord {
    /// Wraps an employee whose department and sports have not been resolved.
    pub fn unresolved(employee: Employee) -> Self {
        Self {
            employee,
            department_name: None,
            sports: Vec::new(),
        }
    }
}
