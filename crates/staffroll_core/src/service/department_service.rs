//! Department policy.
//!
//! # Invariants
//! - Name uniqueness is checked against every department, deleted or not.
//! - `delete_department` is idempotent: repeat calls succeed silently.
//! - `get_employees_by_department_id` tolerates a deleted department; it is
//!   the only read that does.

use crate::dto::{DepartmentDto, EmployeeDto};
use crate::mapper::{map_to_department, map_to_department_dto, map_to_employee_dto};
use crate::model::department::{Department, DepartmentId};
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{error, info};

/// Policy service for departments.
pub struct DepartmentService<D: DepartmentRepository, E: EmployeeRepository> {
    repo: D,
    employees: E,
}

impl<D: DepartmentRepository, E: EmployeeRepository> DepartmentService<D, E> {
    /// Creates a service over a department store and the employee store
    /// used for back-reference reads.
    pub fn new(repo: D, employees: E) -> Self {
        Self { repo, employees }
    }

    pub fn add_department(&self, dto: &DepartmentDto) -> ServiceResult<DepartmentDto> {
        if self.repo.exists_by_name(&dto.name)? {
            error!("event=department_add module=service status=error error_code=already_exists");
            return Err(ServiceError::AlreadyExists(format!(
                "Department already exists with name: {}",
                dto.name
            )));
        }

        let mut department = map_to_department(dto);
        department.id = None;
        let created = self.repo.save(&department)?;
        info!(
            "event=department_add module=service status=ok department_id={}",
            created.id.unwrap_or_default()
        );
        Ok(map_to_department_dto(&created))
    }

    /// Lists non-deleted departments in store order.
    pub fn get_all_departments(&self) -> ServiceResult<Vec<DepartmentDto>> {
        let departments = self
            .repo
            .find_all()?
            .iter()
            .filter(|department| !department.is_deleted)
            .map(map_to_department_dto)
            .collect::<Vec<_>>();
        info!(
            "event=department_list module=service status=ok count={}",
            departments.len()
        );
        Ok(departments)
    }

    /// Fails with `NotFound` when absent or deleted.
    pub fn get_department_by_id(&self, id: DepartmentId) -> ServiceResult<DepartmentDto> {
        let department = self.visible_department(id, "Department is deleted with ID")?;
        Ok(map_to_department_dto(&department))
    }

    /// Overwrites the name of a visible department.
    pub fn update_department(
        &self,
        id: DepartmentId,
        dto: &DepartmentDto,
    ) -> ServiceResult<DepartmentDto> {
        let mut department =
            self.visible_department(id, "Cannot update a deleted department with ID")?;
        department.name = dto.name.clone();
        let updated = self.repo.save(&department)?;
        info!("event=department_update module=service status=ok department_id={id}");
        Ok(map_to_department_dto(&updated))
    }

    pub fn delete_department(&self, id: DepartmentId) -> ServiceResult<()> {
        let mut department = self.find_department(id)?;
        department.soft_delete();
        self.repo.save(&department)?;
        info!("event=department_delete module=service status=ok department_id={id}");
        Ok(())
    }

    /// Lists active employees of a department, deleted departments included.
    pub fn get_employees_by_department_id(
        &self,
        id: DepartmentId,
    ) -> ServiceResult<Vec<EmployeeDto>> {
        self.find_department(id)?;
        let employees = self
            .employees
            .find_by_department_id(id)?
            .iter()
            .filter(|record| record.employee.is_active)
            .map(map_to_employee_dto)
            .collect::<Vec<_>>();
        info!(
            "event=department_employees module=service status=ok department_id={id} count={}",
            employees.len()
        );
        Ok(employees)
    }

    fn find_department(&self, id: DepartmentId) -> ServiceResult<Department> {
        self.repo.find_by_id(id)?.ok_or_else(|| {
            error!("event=department_lookup module=service status=error error_code=not_found department_id={id}");
            ServiceError::NotFound(format!("Department not found with ID: {id}"))
        })
    }

    fn visible_department(
        &self,
        id: DepartmentId,
        deleted_message: &str,
    ) -> ServiceResult<Department> {
        let department = self.find_department(id)?;
        if department.is_deleted {
            error!("event=department_lookup module=service status=error error_code=deleted department_id={id}");
            return Err(ServiceError::NotFound(format!("{deleted_message}: {id}")));
        }
        Ok(department)
    }
}
