//! Sport domain model.

use serde::{Deserialize, Serialize};

/// Store-assigned sport identifier.
pub type SportId = i64;

/// A sport employees can be enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    /// `None` until the store assigns an identity on first save.
    pub id: Option<SportId>,
    /// Globally unique, including against inactive sports.
    pub name: String,
    /// `false` means soft-deleted.
    pub is_active: bool,
}

impl Sport {
    /// Creates a new, active sport without identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_active: true,
        }
    }

    /// Marks this sport as inactive (soft-deleted).
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
