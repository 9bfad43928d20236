//! Core domain logic for Staffroll.
//! This crate owns the employee/department/sport business rules and their
//! SQLite persistence.

pub mod db;
pub mod dto;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;

pub use dto::{DepartmentDto, EmployeeDto, FieldError, SportDto, ValidationError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Address, Employee, EmployeeId, EmployeeRecord, SportSummary};
pub use model::sport::{Sport, SportId};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::sport_repo::{SportRepository, SqliteSportRepository};
pub use repo::{RepoError, RepoResult};
pub use service::department_service::DepartmentService;
pub use service::employee_service::EmployeeService;
pub use service::sport_service::SportService;
pub use service::{ErrorKind, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
