//! Employee policy.
//!
//! # Responsibility
//! - Create, read, update and soft-delete employees.
//! - Own the employee's department and sport links, resolving both through
//!   the sibling policies.
//!
//! # Invariants
//! - `(name, department_id)` is unique at creation only, inactive
//!   employees included. Updates do not re-check it.
//! - Reading an inactive employee by id is `InvalidState`, not `NotFound`.
//! - `delete_employee` is idempotent.
//! - Updates keep the id, replace the address wholesale and clear every
//!   sport link.

use crate::dto::EmployeeDto;
use crate::mapper::{map_to_address, map_to_employee, map_to_employee_dto};
use crate::model::employee::{EmployeeId, EmployeeRecord};
use crate::model::sport::SportId;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::sport_repo::SportRepository;
use crate::service::department_service::DepartmentService;
use crate::service::sport_service::SportService;
use crate::service::{ServiceError, ServiceResult};
use log::{error, info};

/// Policy service for employees.
///
/// Borrows the department and sport policies as collaborators; they are
/// the only way this service resolves a department or sport id.
pub struct EmployeeService<'p, E, D, S>
where
    E: EmployeeRepository,
    D: DepartmentRepository,
    S: SportRepository,
{
    repo: E,
    departments: &'p DepartmentService<D, E>,
    sports: &'p SportService<S, E>,
}

impl<'p, E, D, S> EmployeeService<'p, E, D, S>
where
    E: EmployeeRepository,
    D: DepartmentRepository,
    S: SportRepository,
{
    pub fn new(
        repo: E,
        departments: &'p DepartmentService<D, E>,
        sports: &'p SportService<S, E>,
    ) -> Self {
        Self {
            repo,
            departments,
            sports,
        }
    }

    /// Creates an active employee in an existing, visible department.
    pub fn add_employee(&self, dto: &EmployeeDto) -> ServiceResult<EmployeeDto> {
        if self
            .repo
            .exists_by_name_and_department_id(&dto.name, dto.department_id)?
        {
            error!(
                "event=employee_add module=service status=error error_code=already_exists department_id={}",
                dto.department_id
            );
            return Err(ServiceError::AlreadyExists(
                "Employee already exists in the department.".to_string(),
            ));
        }

        let department = self.departments.get_department_by_id(dto.department_id)?;

        let mut employee = map_to_employee(dto);
        employee.department_id = department.id;
        employee.address = map_to_address(dto);
        let id = self.repo.save(&employee)?;
        info!(
            "event=employee_add module=service status=ok employee_id={id} department_id={}",
            department.id
        );

        self.read_back(id, "created employee not found in read-back")
    }

    /// Lists active employees in store order.
    pub fn get_all_employees(&self) -> ServiceResult<Vec<EmployeeDto>> {
        let employees = self
            .repo
            .find_all()?
            .iter()
            .filter(|record| record.employee.is_active)
            .map(map_to_employee_dto)
            .collect::<Vec<_>>();
        info!(
            "event=employee_list module=service status=ok count={}",
            employees.len()
        );
        Ok(employees)
    }

    /// Fails with `NotFound` when absent and `InvalidState` when inactive.
    pub fn get_employee_by_id(&self, id: EmployeeId) -> ServiceResult<EmployeeDto> {
        let record = self.find_employee(id)?;
        if !record.employee.is_active {
            error!("event=employee_lookup module=service status=error error_code=inactive employee_id={id}");
            return Err(ServiceError::InvalidState(format!(
                "Employee is inactive with ID: {id}"
            )));
        }
        Ok(map_to_employee_dto(&record))
    }

    /// Rewrites an active employee from `dto`, keeping only its id.
    ///
    /// The rebuilt employee starts with no sports, so the save drops every
    /// existing sport link.
    pub fn update_employee(&self, id: EmployeeId, dto: &EmployeeDto) -> ServiceResult<EmployeeDto> {
        let existing = self.find_employee(id)?;
        if !existing.employee.is_active {
            error!("event=employee_update module=service status=error error_code=inactive employee_id={id}");
            return Err(ServiceError::NotFound(format!(
                "Cannot update an inactive employee with ID: {id}"
            )));
        }

        let department = self.departments.get_department_by_id(dto.department_id)?;

        let mut employee = map_to_employee(dto);
        employee.id = Some(id);
        employee.department_id = department.id;
        employee.address = map_to_address(dto);
        self.repo.save(&employee)?;
        info!(
            "event=employee_update module=service status=ok employee_id={id} department_id={}",
            department.id
        );

        self.read_back(id, "updated employee not found in read-back")
    }

    /// Marks the employee inactive. Repeat calls succeed.
    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<()> {
        let mut employee = self.find_employee(id)?.employee;
        employee.deactivate();
        self.repo.save(&employee)?;
        info!("event=employee_delete module=service status=ok employee_id={id}");
        Ok(())
    }

    /// Links a visible sport to the employee.
    ///
    /// A sport that does not resolve through the sport policy (absent or
    /// inactive) fails with that policy's `NotFound`.
    pub fn add_sport_to_employee(
        &self,
        employee_id: EmployeeId,
        sport_id: SportId,
    ) -> ServiceResult<EmployeeDto> {
        let mut employee = self.find_employee(employee_id)?.employee;
        let sport = self.sports.get_sport_by_id(sport_id)?;

        if employee.has_sport(sport.id) {
            error!("event=employee_add_sport module=service status=error error_code=already_assigned employee_id={employee_id} sport_id={sport_id}");
            return Err(ServiceError::AlreadyExists(format!(
                "Sport with ID: {sport_id} is already assigned to Employee with ID: {employee_id}"
            )));
        }

        employee.sport_ids.insert(sport.id);
        self.repo.save(&employee)?;
        info!("event=employee_add_sport module=service status=ok employee_id={employee_id} sport_id={sport_id}");

        self.read_back(employee_id, "employee missing after sport link")
    }

    /// Unlinks a sport from the employee.
    ///
    /// Fails with `NotAssigned` when the sport resolves but is not linked.
    pub fn remove_sport_from_employee(
        &self,
        employee_id: EmployeeId,
        sport_id: SportId,
    ) -> ServiceResult<EmployeeDto> {
        let mut employee = self.find_employee(employee_id)?.employee;
        let sport = self.sports.get_sport_by_id(sport_id)?;

        if !employee.sport_ids.remove(&sport.id) {
            error!("event=employee_remove_sport module=service status=error error_code=not_assigned employee_id={employee_id} sport_id={sport_id}");
            return Err(ServiceError::NotAssigned {
                employee_id,
                sport_id,
            });
        }

        self.repo.save(&employee)?;
        info!("event=employee_remove_sport module=service status=ok employee_id={employee_id} sport_id={sport_id}");

        self.read_back(employee_id, "employee missing after sport unlink")
    }

    fn find_employee(&self, id: EmployeeId) -> ServiceResult<EmployeeRecord> {
        self.repo.find_by_id(id)?.ok_or_else(|| {
            error!("event=employee_lookup module=service status=error error_code=not_found employee_id={id}");
            ServiceError::NotFound(format!("Employee not found with ID: {id}"))
        })
    }

    fn read_back(&self, id: EmployeeId, context: &'static str) -> ServiceResult<EmployeeDto> {
        let record = self
            .repo
            .find_by_id(id)?
            .ok_or(ServiceError::InconsistentState(context))?;
        Ok(map_to_employee_dto(&record))
    }
}
