//! Department repository contract and SQLite implementation.

use crate::model::department::{Department, DepartmentId};
use crate::repo::{bool_to_int, parse_flag, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, is_deleted FROM departments";

/// Store access for departments.
pub trait DepartmentRepository {
    /// Returns the department regardless of its deleted flag.
    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    /// Returns every department, deleted ones included, in id order.
    fn find_all(&self) -> RepoResult<Vec<Department>>;
    /// Inserts when `id` is `None`, otherwise overwrites the row by id.
    fn save(&self, department: &Department) -> RepoResult<Department>;
    /// Uniqueness probe over all departments, deleted ones included.
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
}

/// SQLite-backed department repository.
#[derive(Clone, Copy)]
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                raw_department,
            )
            .optional()?;
        row.map(into_department).transpose()
    }

    fn find_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query_map([], raw_department)?;

        let mut departments = Vec::new();
        for row in rows {
            departments.push(into_department(row?)?);
        }
        Ok(departments)
    }

    fn save(&self, department: &Department) -> RepoResult<Department> {
        let Some(id) = department.id else {
            self.conn.execute(
                "INSERT INTO departments (name, is_deleted) VALUES (?1, ?2);",
                params![department.name, bool_to_int(department.is_deleted)],
            )?;
            return Ok(Department {
                id: Some(self.conn.last_insert_rowid()),
                ..department.clone()
            });
        };

        let changed = self.conn.execute(
            "UPDATE departments SET name = ?1, is_deleted = ?2 WHERE id = ?3;",
            params![department.name, bool_to_int(department.is_deleted), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "department",
                id,
            });
        }
        Ok(department.clone())
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM departments WHERE name = ?1);",
            [name],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }
}

type RawDepartment = (DepartmentId, String, i64);

fn raw_department(row: &Row<'_>) -> rusqlite::Result<RawDepartment> {
    Ok((row.get("id")?, row.get("name")?, row.get("is_deleted")?))
}

fn into_department((id, name, is_deleted): RawDepartment) -> RepoResult<Department> {
    Ok(Department {
        id: Some(id),
        name,
        is_deleted: parse_flag(is_deleted, "departments.is_deleted")?,
    })
}
