//! Domain model definitions.
//!
//! # Responsibility
//! - Define the persisted shape of departments, sports and employees.
//! - Keep cross-entity links as plain identifiers resolved by services.
//!
//! # Invariants
//! - Soft-delete flags are the single source of truth for visibility.
//! - Employee is authoritative for its department and sport links.

pub mod department;
pub mod employee;
pub mod sport;
