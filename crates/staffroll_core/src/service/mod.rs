//! Entity-relationship policies.
//!
//! # Responsibility
//! - Enforce visibility (soft delete), uniqueness and association rules.
//! - Translate persisted entities into DTOs at the policy boundary.
//!
//! # Invariants
//! - Policies never retry or recover; every failure reaches the caller.
//! - Per-entity visibility asymmetries are explicit in each service.

use crate::model::employee::EmployeeId;
use crate::model::sport::SportId;
use crate::repo::RepoError;
use thiserror::Error;

pub mod department_service;
pub mod employee_service;
pub mod sport_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain-level failure classification used by request boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    AlreadyDeleted,
    InvalidState,
    Internal,
}

/// Failure raised by a policy operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Entity is absent, or hidden by the operation's visibility rule.
    #[error("{0}")]
    NotFound(String),
    /// A domain uniqueness rule would be violated.
    #[error("{0}")]
    AlreadyExists(String),
    /// Repeat delete of an already inactive sport.
    #[error("{0}")]
    AlreadyDeleted(String),
    /// Entity exists but is in a state the operation refuses.
    #[error("{0}")]
    InvalidState(String),
    /// Sport removal requested for a sport the employee does not have.
    #[error("sport with ID: {sport_id} is not assigned to employee with ID: {employee_id}")]
    NotAssigned {
        employee_id: EmployeeId,
        sport_id: SportId,
    },
    /// Write succeeded but the read-back did not match.
    #[error("inconsistent state: {0}")]
    InconsistentState(&'static str),
    #[error(transparent)]
    Repo(RepoError),
}

impl ServiceError {
    /// Returns the domain classification of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::NotAssigned { .. } => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::AlreadyDeleted(_) => ErrorKind::AlreadyDeleted,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InconsistentState(_) | Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UniqueViolation(detail) => {
                Self::AlreadyExists(format!("resource already exists: {detail}"))
            }
            RepoError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found with ID: {id}"))
            }
            other => Self::Repo(other),
        }
    }
}
