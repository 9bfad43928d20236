//! Sport policy.
//!
//! # Invariants
//! - Name uniqueness is checked against every sport, active or not.
//! - Deleting an inactive sport fails with `AlreadyDeleted`.
//! - `get_employees_by_sport_id` tolerates an inactive sport.

use crate::dto::{EmployeeDto, SportDto};
use crate::mapper::{map_to_employee_dto, map_to_sport, map_to_sport_dto};
use crate::model::sport::{Sport, SportId};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::sport_repo::SportRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{error, info};

/// Policy service for sports.
pub struct SportService<S: SportRepository, E: EmployeeRepository> {
    repo: S,
    employees: E,
}

impl<S: SportRepository, E: EmployeeRepository> SportService<S, E> {
    /// Creates a service over a sport store and the employee store used for
    /// back-reference reads.
    pub fn new(repo: S, employees: E) -> Self {
        Self { repo, employees }
    }

    pub fn add_sport(&self, dto: &SportDto) -> ServiceResult<SportDto> {
        if self.repo.exists_by_name(&dto.name)? {
            error!("event=sport_add module=service status=error error_code=already_exists");
            return Err(ServiceError::AlreadyExists(format!(
                "Sport already exists with name: {}",
                dto.name
            )));
        }

        let mut sport = map_to_sport(dto);
        sport.id = None;
        let created = self.repo.save(&sport)?;
        info!(
            "event=sport_add module=service status=ok sport_id={}",
            created.id.unwrap_or_default()
        );
        Ok(map_to_sport_dto(&created))
    }

    /// Lists active sports in store order.
    pub fn get_all_sports(&self) -> ServiceResult<Vec<SportDto>> {
        let sports = self
            .repo
            .find_all()?
            .iter()
            .filter(|sport| sport.is_active)
            .map(map_to_sport_dto)
            .collect::<Vec<_>>();
        info!("event=sport_list module=service status=ok count={}", sports.len());
        Ok(sports)
    }

    /// Fails with `NotFound` when absent, or when inactive ("is deleted").
    pub fn get_sport_by_id(&self, id: SportId) -> ServiceResult<SportDto> {
        let sport = self.active_sport(id, "Sport is deleted with ID")?;
        Ok(map_to_sport_dto(&sport))
    }

    pub fn update_sport(&self, id: SportId, dto: &SportDto) -> ServiceResult<SportDto> {
        let mut sport = self.active_sport(id, "Cannot update a deleted sport with ID")?;
        sport.name = dto.name.clone();
        let updated = self.repo.save(&sport)?;
        info!("event=sport_update module=service status=ok sport_id={id}");
        Ok(map_to_sport_dto(&updated))
    }

    pub fn delete_sport(&self, id: SportId) -> ServiceResult<()> {
        let mut sport = self.find_sport(id)?;
        if !sport.is_active {
            error!("event=sport_delete module=service status=error error_code=already_deleted sport_id={id}");
            return Err(ServiceError::AlreadyDeleted(format!(
                "Sport is already deleted: {}",
                sport.name
            )));
        }

        sport.deactivate();
        self.repo.save(&sport)?;
        info!("event=sport_delete module=service status=ok sport_id={id}");
        Ok(())
    }

    /// Lists active employees enrolled in a sport, inactive sports included.
    pub fn get_employees_by_sport_id(&self, id: SportId) -> ServiceResult<Vec<EmployeeDto>> {
        self.find_sport(id)?;
        let employees = self
            .employees
            .find_by_sport_id(id)?
            .iter()
            .filter(|record| record.employee.is_active)
            .map(map_to_employee_dto)
            .collect::<Vec<_>>();
        info!(
            "event=sport_employees module=service status=ok sport_id={id} count={}",
            employees.len()
        );
        Ok(employees)
    }

    fn find_sport(&self, id: SportId) -> ServiceResult<Sport> {
        self.repo.find_by_id(id)?.ok_or_else(|| {
            error!("event=sport_lookup module=service status=error error_code=not_found sport_id={id}");
            ServiceError::NotFound(format!("Sport not found with ID: {id}"))
        })
    }

    fn active_sport(&self, id: SportId, inactive_message: &str) -> ServiceResult<Sport> {
        let sport = self.find_sport(id)?;
        if !sport.is_active {
            error!("event=sport_lookup module=service status=error error_code=deleted sport_id={id}");
            return Err(ServiceError::NotFound(format!("{inactive_message}: {id}")));
        }
        Ok(sport)
    }
}
