//! Sport repository contract and SQLite implementation.

use crate::model::sport::{Sport, SportId};
use crate::repo::{bool_to_int, parse_flag, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SPORT_SELECT_SQL: &str = "SELECT id, name, is_active FROM sports";

/// Store access for sports.
pub trait SportRepository {
    /// Returns the sport regardless of its active flag.
    fn find_by_id(&self, id: SportId) -> RepoResult<Option<Sport>>;
    /// Returns every sport, inactive ones included, in id order.
    fn find_all(&self) -> RepoResult<Vec<Sport>>;
    /// Inserts when `id` is `None`, otherwise overwrites the row by id.
    fn save(&self, sport: &Sport) -> RepoResult<Sport>;
    /// Uniqueness probe over all sports, inactive ones included.
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
}

/// SQLite-backed sport repository.
#[derive(Clone, Copy)]
pub struct SqliteSportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSportRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SportRepository for SqliteSportRepository<'_> {
    fn find_by_id(&self, id: SportId) -> RepoResult<Option<Sport>> {
        let row = self
            .conn
            .query_row(&format!("{SPORT_SELECT_SQL} WHERE id = ?1;"), [id], raw_sport)
            .optional()?;
        row.map(into_sport).transpose()
    }

    fn find_all(&self) -> RepoResult<Vec<Sport>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SPORT_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query_map([], raw_sport)?;

        let mut sports = Vec::new();
        for row in rows {
            sports.push(into_sport(row?)?);
        }
        Ok(sports)
    }

    fn save(&self, sport: &Sport) -> RepoResult<Sport> {
        let Some(id) = sport.id else {
            self.conn.execute(
                "INSERT INTO sports (name, is_active) VALUES (?1, ?2);",
                params![sport.name, bool_to_int(sport.is_active)],
            )?;
            return Ok(Sport {
                id: Some(self.conn.last_insert_rowid()),
                ..sport.clone()
            });
        };

        let changed = self.conn.execute(
            "UPDATE sports SET name = ?1, is_active = ?2 WHERE id = ?3;",
            params![sport.name, bool_to_int(sport.is_active), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "sport", id });
        }
        Ok(sport.clone())
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sports WHERE name = ?1);",
            [name],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }
}

type RawSport = (SportId, String, i64);

fn raw_sport(row: &Row<'_>) -> rusqlite::Result<RawSport> {
    Ok((row.get("id")?, row.get("name")?, row.get("is_active")?))
}

fn into_sport((id, name, is_active): RawSport) -> RepoResult<Sport> {
    Ok(Sport {
        id: Some(id),
        name,
        is_active: parse_flag(is_active, "sports.is_active")?,
    })
}
