//! Translation between persisted entities and external DTOs.
//!
//! # Responsibility
//! - Map departments, sports and employees to and from their DTOs.
//! - Denormalize department name and sport summaries onto employees.
//! - Derive age from date of birth at translation time.
//!
//! # Invariants
//! - Age is computed on every translation and never read from storage.
//! - `map_to_employee` leaves department, address and sports for the
//!   policy to resolve.

use crate::dto::{DepartmentDto, EmployeeDto, SportDto};
use crate::model::department::Department;
use crate::model::employee::{Address, Employee, EmployeeRecord, SportSummary};
use crate::model::sport::Sport;
use chrono::{Local, NaiveDate};

/// Whole years elapsed between `dob` and `on`.
///
/// Returns 0 when `dob` lies after `on`.
pub fn calculate_age(dob: NaiveDate, on: NaiveDate) -> u32 {
    on.years_since(dob).unwrap_or(0)
}

pub fn map_to_department_dto(department: &Department) -> DepartmentDto {
    DepartmentDto {
        id: department.id.unwrap_or_default(),
        name: department.name.clone(),
    }
}

/// Builds a visible department from its DTO; a zero id maps to "unsaved".
pub fn map_to_department(dto: &DepartmentDto) -> Department {
    Department {
        id: (dto.id != 0).then_some(dto.id),
        ..Department::new(dto.name.clone())
    }
}

pub fn map_to_sport_dto(sport: &Sport) -> SportDto {
    SportDto {
        id: sport.id.unwrap_or_default(),
        name: sport.name.clone(),
    }
}

/// Builds an active sport from its DTO; a zero id maps to "unsaved".
pub fn map_to_sport(dto: &SportDto) -> Sport {
    Sport {
        id: (dto.id != 0).then_some(dto.id),
        ..Sport::new(dto.name.clone())
    }
}

/// Translates an employee record using today's local date for `age`.
pub fn map_to_employee_dto(record: &EmployeeRecord) -> EmployeeDto {
    map_to_employee_dto_on(record, Local::now().date_naive())
}

/// Translates an employee record, deriving `age` as of `on`.
pub fn map_to_employee_dto_on(record: &EmployeeRecord, on: NaiveDate) -> EmployeeDto {
    let employee = &record.employee;
    EmployeeDto {
        id: employee.id.unwrap_or_default(),
        name: employee.name.clone(),
        dob: employee.dob,
        age: calculate_age(employee.dob, on),
        email: employee.email.clone(),
        department_id: employee.department_id,
        department_name: record.department_name.clone(),
        street: employee.address.street.clone(),
        city: employee.address.city.clone(),
        state: employee.address.state.clone(),
        zip: employee.address.zip.clone(),
        sports: record.sports.iter().map(sport_summary_dto).collect(),
    }
}

/// Copies name, date of birth and email into a new active employee.
pub fn map_to_employee(dto: &EmployeeDto) -> Employee {
    Employee::new(dto.name.clone(), dto.dob, dto.email.clone())
}

/// Builds the owned address from the flattened DTO fields.
pub fn map_to_address(dto: &EmployeeDto) -> Address {
    Address {
        street: dto.street.clone(),
        city: dto.city.clone(),
        state: dto.state.clone(),
        zip: dto.zip.clone(),
    }
}

fn sport_summary_dto(summary: &SportSummary) -> SportDto {
    SportDto {
        id: summary.id,
        name: summary.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_dto() -> EmployeeDto {
        EmployeeDto {
            id: 0,
            name: "Santhosh".to_string(),
            dob: date(1990, 1, 1),
            age: 0,
            email: "santhosh@example.com".to_string(),
            department_id: 1,
            department_name: None,
            street: "12th Main St".to_string(),
            city: "Tambaram".to_string(),
            state: "Tamil Nadu".to_string(),
            zip: "123456".to_string(),
            sports: Vec::new(),
        }
    }

    #[test]
    fn age_on_birthday_counts_the_full_year() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 15)), 24);
    }

    #[test]
    fn age_before_birthday_is_one_less() {
        assert_eq!(calculate_age(date(2000, 6, 15), date(2024, 6, 14)), 23);
    }

    #[test]
    fn age_of_future_dob_is_zero() {
        assert_eq!(calculate_age(date(2030, 1, 1), date(2024, 6, 15)), 0);
    }

    #[test]
    fn employee_round_trip_keeps_identity_fields() {
        let dto = sample_dto();
        let employee = map_to_employee(&dto);
        assert!(employee.is_active);
        assert_eq!(employee.id, None);

        let back = map_to_employee_dto_on(&EmployeeRecord::unresolved(employee), date(2024, 1, 1));
        assert_eq!(back.name, dto.name);
        assert_eq!(back.dob, dto.dob);
        assert_eq!(back.email, dto.email);
        assert_eq!(back.age, 34);
        assert_eq!(back.department_name, None);
        assert!(back.sports.is_empty());
    }

    #[test]
    fn employee_dto_flattens_address_and_denormalizes_links() {
        let mut employee = map_to_employee(&sample_dto());
        employee.id = Some(7);
        employee.department_id = 3;
        employee.address = map_to_address(&sample_dto());
        employee.sport_ids = [2, 5].into_iter().collect();
        let record = EmployeeRecord {
            employee,
            department_name: Some("IT".to_string()),
            sports: vec![
                SportSummary {
                    id: 2,
                    name: "Chess".to_string(),
                },
                SportSummary {
                    id: 5,
                    name: "Rugby".to_string(),
                },
            ],
        };

        let dto = map_to_employee_dto_on(&record, date(2024, 1, 1));
        assert_eq!(dto.id, 7);
        assert_eq!(dto.department_id, 3);
        assert_eq!(dto.department_name.as_deref(), Some("IT"));
        assert_eq!(dto.city, "Tambaram");
        assert_eq!(dto.zip, "123456");
        let sport_ids: Vec<_> = dto.sports.iter().map(|sport| sport.id).collect();
        assert_eq!(sport_ids, vec![2, 5]);
    }

    #[test]
    fn department_mapping_treats_zero_id_as_unsaved() {
        let department = map_to_department(&DepartmentDto::named("HR"));
        assert_eq!(department.id, None);
        assert!(!department.is_deleted);

        let saved = Department {
            id: Some(4),
            ..department
        };
        assert_eq!(
            map_to_department_dto(&saved),
            DepartmentDto {
                id: 4,
                name: "HR".to_string()
            }
        );
    }

    #[test]
    fn sport_mapping_defaults_to_active() {
        let sport = map_to_sport(&SportDto {
            id: 9,
            name: "Chess".to_string(),
        });
        assert_eq!(sport.id, Some(9));
        assert!(sport.is_active);
        assert_eq!(map_to_sport_dto(&sport).name, "Chess");
    }
}
