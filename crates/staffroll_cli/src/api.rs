//! Request boundary.
//!
//! # Responsibility
//! - Validate inbound DTOs before any policy runs.
//! - Invoke the department, sport and employee policies.
//! - Map every failure to a status code and a structured error body.
//!
//! # Invariants
//! - AlreadyExists is 409, NotFound (unassigned sport included) is 404,
//!   validation is 400, everything else is 500.
//! - `details` carries the failure's own message. `message` is the fixed
//!   banner for 404/409/500 and the field summary for 400.

use log::warn;
use rusqlite::Connection;
use serde::Serialize;
use staffroll_core::{
    DepartmentDto, DepartmentId, DepartmentService, EmployeeDto, EmployeeId, EmployeeService,
    ErrorKind, FieldError, ServiceError, SportDto, SportId, SportService,
    SqliteDepartmentRepository, SqliteEmployeeRepository, SqliteSportRepository,
    ValidationError,
};

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_INTERNAL: u16 = 500;

const CONFLICT_BANNER: &str = "Conflict: The resource you're trying to create or update already exists. Please check your input and try again.";
const NOT_FOUND_BANNER: &str = "Resource Not Found: The resource you're looking for could not be found. It may have been moved, deleted, or you may have the wrong ID.";
const INTERNAL_BANNER: &str = "Internal Server Error: An unexpected error occurred on the server. Please try again later or contact support if the issue persists.";

const DEPARTMENTS_URL: &str = "api/v1/departments";
const SPORTS_URL: &str = "api/v1/sports";
const EMPLOYEES_URL: &str = "api/v1/employees";

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body returned for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub details: String,
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn from_service(error: &ServiceError, url: impl Into<String>) -> Self {
        let status = status_for(error.kind());
        let banner = banner_for(status).to_string();
        Self::build(status, banner, error.to_string(), url.into(), Vec::new())
    }

    /// 400 body. There is no banner; `message` and `details` both carry the
    /// per-field summary and `field_errors` lists each rejected field.
    pub fn from_validation(error: ValidationError, url: impl Into<String>) -> Self {
        let summary = error.to_string();
        Self::build(
            STATUS_BAD_REQUEST,
            summary.clone(),
            summary,
            url.into(),
            error.errors,
        )
    }

    fn build(
        status: u16,
        message: String,
        details: String,
        url: String,
        field_errors: Vec<FieldError>,
    ) -> Self {
        warn!("event=api_request module=api status=error http_status={status} url={url}");
        Self {
            status,
            message,
            details,
            url,
            field_errors,
        }
    }
}

/// Maps a policy failure kind to its response status.
pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::AlreadyExists => STATUS_CONFLICT,
        ErrorKind::NotFound => STATUS_NOT_FOUND,
        ErrorKind::AlreadyDeleted | ErrorKind::InvalidState | ErrorKind::Internal => {
            STATUS_INTERNAL
        }
    }
}

fn banner_for(status: u16) -> &'static str {
    match status {
        STATUS_NOT_FOUND => NOT_FOUND_BANNER,
        STATUS_CONFLICT => CONFLICT_BANNER,
        _ => INTERNAL_BANNER,
    }
}

type Departments<'conn> =
    DepartmentService<SqliteDepartmentRepository<'conn>, SqliteEmployeeRepository<'conn>>;
type Sports<'conn> = SportService<SqliteSportRepository<'conn>, SqliteEmployeeRepository<'conn>>;
type Employees<'a, 'conn> = EmployeeService<
    'a,
    SqliteEmployeeRepository<'conn>,
    SqliteDepartmentRepository<'conn>,
    SqliteSportRepository<'conn>,
>;

/// Boundary facade over one open connection.
pub struct Api<'conn> {
    departments: Departments<'conn>,
    sports: Sports<'conn>,
    employees: SqliteEmployeeRepository<'conn>,
}

impl<'conn> Api<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        let employees = SqliteEmployeeRepository::new(conn);
        Self {
            departments: DepartmentService::new(SqliteDepartmentRepository::new(conn), employees),
            sports: SportService::new(SqliteSportRepository::new(conn), employees),
            employees,
        }
    }

    fn employee_service(&self) -> Employees<'_, 'conn> {
        EmployeeService::new(self.employees, &self.departments, &self.sports)
    }

    pub fn add_department(&self, dto: &DepartmentDto) -> ApiResult<DepartmentDto> {
        let url = DEPARTMENTS_URL.to_string();
        dto.validate()
            .map_err(|err| ApiError::from_validation(err, url.as_str()))?;
        self.departments
            .add_department(dto)
            .map_err(|err| ApiError::from_service(&err, url))
    }

    pub fn list_departments(&self) -> ApiResult<Vec<DepartmentDto>> {
        self.departments
            .get_all_departments()
            .map_err(|err| ApiError::from_service(&err, format!("{DEPARTMENTS_URL}/list")))
    }

    pub fn get_department(&self, id: DepartmentId) -> ApiResult<DepartmentDto> {
        self.departments
            .get_department_by_id(id)
            .map_err(|err| ApiError::from_service(&err, format!("{DEPARTMENTS_URL}/{id}")))
    }

    pub fn update_department(
        &self,
        id: DepartmentId,
        dto: &DepartmentDto,
    ) -> ApiResult<DepartmentDto> {
        let url = format!("{DEPARTMENTS_URL}/update/{id}");
        dto.validate()
            .map_err(|err| ApiError::from_validation(err, url.as_str()))?;
        self.departments
            .update_department(id, dto)
            .map_err(|err| ApiError::from_service(&err, url))
    }

    pub fn delete_department(&self, id: DepartmentId) -> ApiResult<()> {
        self.departments
            .delete_department(id)
            .map_err(|err| ApiError::from_service(&err, format!("{DEPARTMENTS_URL}/delete/{id}")))
    }

    pub fn department_employees(&self, id: DepartmentId) -> ApiResult<Vec<EmployeeDto>> {
        self.departments
            .get_employees_by_department_id(id)
            .map_err(|err| {
                ApiError::from_service(&err, format!("{DEPARTMENTS_URL}/employees/{id}"))
            })
    }

    pub fn add_sport(&self, dto: &SportDto) -> ApiResult<SportDto> {
        let url = SPORTS_URL.to_string();
        dto.validate()
            .map_err(|err| ApiError::from_validation(err, url.as_str()))?;
        self.sports
            .add_sport(dto)
            .map_err(|err| ApiError::from_service(&err, url))
    }

    pub fn list_sports(&self) -> ApiResult<Vec<SportDto>> {
        self.sports
            .get_all_sports()
            .map_err(|err| ApiError::from_service(&err, format!("{SPORTS_URL}/list")))
    }

    pub fn get_sport(&self, id: SportId) -> ApiResult<SportDto> {
        self.sports
            .get_sport_by_id(id)
            .map_err(|err| ApiError::from_service(&err, format!("{SPORTS_URL}/{id}")))
    }

    pub fn update_sport(&self, id: SportId, dto: &SportDto) -> ApiResult<SportDto> {
        let url = format!("{SPORTS_URL}/update/{id}");
        dto.validate()
            .map_err(|err| ApiError::from_validation(err, url.as_str()))?;
        self.sports
            .update_sport(id, dto)
            .map_err(|err| ApiError::from_service(&err, url))
    }

    pub fn delete_sport(&self, id: SportId) -> ApiResult<()> {
        self.sports
            .delete_sport(id)
            .map_err(|err| ApiError::from_service(&err, format!("{SPORTS_URL}/delete/{id}")))
    }

    pub fn sport_employees(&self, id: SportId) -> ApiResult<Vec<EmployeeDto>> {
        self.sports
            .get_employees_by_sport_id(id)
            .map_err(|err| ApiError::from_service(&err, format!("{SPORTS_URL}/{id}/employees")))
    }

    pub fn add_employee(&self, dto: &EmployeeDto) -> ApiResult<EmployeeDto> {
        let url = EMPLOYEES_URL.to_string();
        dto.validate()
            .map_err(|err| ApiError::from_validation(err, url.as_str()))?;
        self.employee_service()
            .add_employee(dto)
            .map_err(|err| ApiError::from_service(&err, url))
    }

    pub fn list_employees(&self) -> ApiResult<Vec<EmployeeDto>> {
        self.employee_service()
            .get_all_employees()
            .map_err(|err| ApiError::from_service(&err, format!("{EMPLOYEES_URL}/list")))
    }

    pub fn get_employee(&self, id: EmployeeId) -> ApiResult<EmployeeDto> {
        self.employee_service()
            .get_employee_by_id(id)
            .map_err(|err| ApiError::from_service(&err, format!("{EMPLOYEES_URL}/{id}")))
    }

    pub fn update_employee(&self, id: EmployeeId, dto: &EmployeeDto) -> ApiResult<EmployeeDto> {
        let url = format!("{EMPLOYEES_URL}/update/{id}");
        dto.validate()
            .map_err(|err| ApiError::from_validation(err, url.as_str()))?;
        self.employee_service()
            .update_employee(id, dto)
            .map_err(|err| ApiError::from_service(&err, url))
    }

    pub fn delete_employee(&self, id: EmployeeId) -> ApiResult<()> {
        self.employee_service()
            .delete_employee(id)
            .map_err(|err| ApiError::from_service(&err, format!("{EMPLOYEES_URL}/delete/{id}")))
    }

    pub fn add_sport_to_employee(
        &self,
        employee_id: EmployeeId,
        sport_id: SportId,
    ) -> ApiResult<EmployeeDto> {
        self.employee_service()
            .add_sport_to_employee(employee_id, sport_id)
            .map_err(|err| {
                ApiError::from_service(
                    &err,
                    format!("{EMPLOYEES_URL}/{employee_id}/addSport/{sport_id}"),
                )
            })
    }

    pub fn remove_sport_from_employee(
        &self,
        employee_id: EmployeeId,
        sport_id: SportId,
    ) -> ApiResult<EmployeeDto> {
        self.employee_service()
            .remove_sport_from_employee(employee_id, sport_id)
            .map_err(|err| {
                ApiError::from_service(
                    &err,
                    format!("{EMPLOYEES_URL}/{employee_id}/removeSport/{sport_id}"),
                )
            })
    }
}
