//! Department domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned department identifier.
pub type DepartmentId = i64;

/// A department employees belong to.
///
/// Employees of a department are not held here; they are looked up through
/// `EmployeeRepository::find_by_department_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// `None` until the store assigns an identity on first save.
    pub id: Option<DepartmentId>,
    /// Globally unique, including against deleted departments.
    pub name: String,
    /// Soft delete flag. Deleted departments are never removed.
    pub is_deleted: bool,
}

impl Department {
    /// Creates a new, visible department without identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_deleted: false,
        }
    }

    /// Marks this department as softly deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }
}
