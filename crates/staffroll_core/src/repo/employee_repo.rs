//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist employees together with their owned address and sport links.
//! - Serve the joined `EmployeeRecord` read model, including the
//!   department/sport back-reference queries.
//!
//! # Invariants
//! - One `save` writes the employee row, its address and its sport links
//!   atomically.
//! - `save` replaces the address and the sport link set wholesale.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::department::DepartmentId;
use crate::model::employee::{Address, Employee, EmployeeId, EmployeeRecord, SportSummary};
use crate::model::sport::SportId;
use crate::repo::{bool_to_int, parse_flag, with_savepoint, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};
use std::collections::BTreeSet;

const DOB_FORMAT: &str = "%Y-%m-%d";

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    e.id,
    e.name,
    e.dob,
    e.email,
    e.is_active,
    e.department_id,
    d.name AS department_name,
    a.street,
    a.city,
    a.state,
    a.zip
FROM employees e
LEFT JOIN departments d ON d.id = e.department_id
LEFT JOIN addresses a ON a.employee_id = e.id";

/// Store access for employees.
pub trait EmployeeRepository {
    /// Returns the employee regardless of its active flag.
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<EmployeeRecord>>;
    /// Returns every employee, inactive ones included, in id order.
    fn find_all(&self) -> RepoResult<Vec<EmployeeRecord>>;
    /// Back-reference: every employee linked to the department.
    fn find_by_department_id(&self, department_id: DepartmentId)
        -> RepoResult<Vec<EmployeeRecord>>;
    /// Back-reference: every employee linked to the sport.
    fn find_by_sport_id(&self, sport_id: SportId) -> RepoResult<Vec<EmployeeRecord>>;
    /// Inserts when `id` is `None`, otherwise rewrites the employee by id.
    ///
    /// Returns the persisted identity.
    fn save(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Uniqueness probe over all employees, inactive ones included.
    fn exists_by_name_and_department_id(
        &self,
        name: &str,
        department_id: DepartmentId,
    ) -> RepoResult<bool>;
}

/// SQLite-backed employee repository.
#[derive(Clone, Copy)]
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_records(&self, filter: &str, params: impl Params) -> RepoResult<Vec<EmployeeRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} {filter} ORDER BY e.id ASC;"))?;
        let mut rows = stmt.query(params)?;

        let mut base = Vec::new();
        while let Some(row) = rows.next()? {
            base.push(parse_employee_row(row)?);
        }
        drop(rows);

        base.into_iter()
            .map(|(employee, department_name)| self.attach_sports(employee, department_name))
            .collect()
    }

    fn attach_sports(
        &self,
        mut employee: Employee,
        department_name: Option<String>,
    ) -> RepoResult<EmployeeRecord> {
        let id = employee.id.ok_or_else(|| {
            RepoError::InvalidData("employee row loaded without id".to_string())
        })?;

        let mut stmt = self.conn.prepare(
            "SELECT s.id, s.name
             FROM employee_sports es
             JOIN sports s ON s.id = es.sport_id
             WHERE es.employee_id = ?1
             ORDER BY s.id ASC;",
        )?;
        let sports = stmt
            .query_map([id], |row| {
                Ok(SportSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        employee.sport_ids = sports.iter().map(|sport| sport.id).collect();
        Ok(EmployeeRecord {
            employee,
            department_name,
            sports,
        })
    }

    fn write_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        let dob = employee.dob.format(DOB_FORMAT).to_string();

        let id = match employee.id {
            None => {
                self.conn.execute(
                    "INSERT INTO employees (name, dob, email, is_active, department_id)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        employee.name,
                        dob,
                        employee.email,
                        bool_to_int(employee.is_active),
                        employee.department_id,
                    ],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE employees
                     SET name = ?1, dob = ?2, email = ?3, is_active = ?4, department_id = ?5
                     WHERE id = ?6;",
                    params![
                        employee.name,
                        dob,
                        employee.email,
                        bool_to_int(employee.is_active),
                        employee.department_id,
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "employee",
                        id,
                    });
                }
                id
            }
        };

        let address = &employee.address;
        self.conn.execute(
            "INSERT INTO addresses (employee_id, street, city, state, zip)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(employee_id) DO UPDATE SET
                street = excluded.street,
                city = excluded.city,
                state = excluded.state,
                zip = excluded.zip;",
            params![id, address.street, address.city, address.state, address.zip],
        )?;

        replace_sport_links(self.conn, id, &employee.sport_ids)?;
        Ok(id)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<EmployeeRecord>> {
        let mut records = self.query_records("WHERE e.id = ?1", [id])?;
        Ok(records.pop())
    }

    fn find_all(&self) -> RepoResult<Vec<EmployeeRecord>> {
        self.query_records("", [])
    }

    fn find_by_department_id(
        &self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<EmployeeRecord>> {
        self.query_records("WHERE e.department_id = ?1", [department_id])
    }

    fn find_by_sport_id(&self, sport_id: SportId) -> RepoResult<Vec<EmployeeRecord>> {
        self.query_records(
            "WHERE e.id IN (SELECT employee_id FROM employee_sports WHERE sport_id = ?1)",
            [sport_id],
        )
    }

    fn save(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        with_savepoint(self.conn, "employee_save", || self.write_employee(employee))
    }

    fn exists_by_name_and_department_id(
        &self,
        name: &str,
        department_id: DepartmentId,
    ) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM employees WHERE name = ?1 AND department_id = ?2
            );",
            params![name, department_id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }
}

fn replace_sport_links(
    conn: &Connection,
    employee_id: EmployeeId,
    sport_ids: &BTreeSet<SportId>,
) -> RepoResult<()> {
    conn.execute(
        "DELETE FROM employee_sports WHERE employee_id = ?1;",
        [employee_id],
    )?;

    let mut stmt =
        conn.prepare("INSERT INTO employee_sports (employee_id, sport_id) VALUES (?1, ?2);")?;
    for sport_id in sport_ids {
        stmt.execute(params![employee_id, sport_id])?;
    }
    Ok(())
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<(Employee, Option<String>)> {
    let id: EmployeeId = row.get("id")?;

    let dob_text: String = row.get("dob")?;
    let dob = NaiveDate::parse_from_str(&dob_text, DOB_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{dob_text}` in employees.dob"))
    })?;

    let address = match (
        row.get::<_, Option<String>>("street")?,
        row.get::<_, Option<String>>("city")?,
        row.get::<_, Option<String>>("state")?,
        row.get::<_, Option<String>>("zip")?,
    ) {
        (Some(street), Some(city), Some(state), Some(zip)) => Address {
            street,
            city,
            state,
            zip,
        },
        _ => {
            return Err(RepoError::InvalidData(format!(
                "missing address for employee {id}"
            )));
        }
    };

    let employee = Employee {
        id: Some(id),
        name: row.get("name")?,
        dob,
        email: row.get("email")?,
        is_active: parse_flag(row.get("is_active")?, "employees.is_active")?,
        address,
        department_id: row.get("department_id")?,
        sport_ids: BTreeSet::new(),
    };
    Ok((employee, row.get("department_name")?))
}
