//! Habit repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable persistence APIs over `habits` + `completions` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Loaded habits are rebuilt through `Habit::from_parts`, so the
//!   one-completion-per-period invariant survives whatever is on disk.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::habit::{Habit, HabitId, HabitValidationError, Periodicity};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Text timestamp format used in the store.
///
/// Round-trips the full instant, well above the day/ISO-week precision the
/// streak engine actually compares on.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const REQUIRED_TABLES: &[&str] = &["habits", "completions"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for habit persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    NotFound(HabitId),
    NameConflict(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::NameConflict(name) => write!(f, "habit name already taken: `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for habit persistence.
pub trait HabitRepository {
    /// Persists a habit and any completions it already carries.
    fn create_habit(&self, habit: &Habit) -> RepoResult<HabitId>;
    /// Loads every habit with its full completion log, oldest habit first.
    fn load_all(&self) -> RepoResult<Vec<Habit>>;
    /// Replaces name and description of an existing habit.
    fn update_habit(&self, id: HabitId, name: &str, description: &str) -> RepoResult<()>;
    /// Appends one completion timestamp for an existing habit.
    fn append_completion(&self, id: HabitId, at: NaiveDateTime) -> RepoResult<()>;
    /// Deletes a habit and its completions.
    fn delete_habit(&self, id: HabitId) -> RepoResult<()>;
}

/// SQLite-backed habit repository.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    /// Wraps a connection after probing that it is ready for use.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected = crate::db::migrations::latest_version();
        let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual != expected {
            return Err(RepoError::UninitializedConnection {
                expected_version: expected,
                actual_version: actual,
            });
        }

        for table in REQUIRED_TABLES {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }

        Ok(Self { conn })
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn create_habit(&self, habit: &Habit) -> RepoResult<HabitId> {
        let tx = self.conn.unchecked_transaction()?;

        let inserted = tx.execute(
            "INSERT INTO habits (uuid, name, description, periodicity, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                habit.id().to_string(),
                habit.name(),
                habit.description(),
                habit.periodicity().as_str(),
                format_timestamp(habit.created_at()),
            ],
        );
        if let Err(err) = inserted {
            return Err(map_name_conflict(err, habit.name()));
        }

        for completion in habit.completions() {
            tx.execute(
                "INSERT INTO completions (habit_uuid, completed_at) VALUES (?1, ?2);",
                params![habit.id().to_string(), format_timestamp(*completion)],
            )?;
        }

        tx.commit()?;
        Ok(habit.id())
    }

    fn load_all(&self) -> RepoResult<Vec<Habit>> {
        let mut habit_stmt = self.conn.prepare(
            "SELECT uuid, name, description, periodicity, created_at
             FROM habits
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut completion_stmt = self.conn.prepare(
            "SELECT completed_at FROM completions
             WHERE habit_uuid = ?1
             ORDER BY completed_at ASC;",
        )?;

        let mut habits = Vec::new();
        let mut rows = habit_stmt.query([])?;
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let id = parse_habit_id(&uuid_text)?;
            let name: String = row.get("name")?;
            let description: String = row.get("description")?;

            let periodicity_text: String = row.get("periodicity")?;
            let periodicity = Periodicity::parse(&periodicity_text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid periodicity `{periodicity_text}` in habits.periodicity"
                ))
            })?;

            let created_text: String = row.get("created_at")?;
            let created_at = parse_timestamp(&created_text, "habits.created_at")?;

            let mut completions = Vec::new();
            let mut completion_rows = completion_stmt.query([&uuid_text])?;
            while let Some(completion_row) = completion_rows.next()? {
                let text: String = completion_row.get("completed_at")?;
                completions.push(parse_timestamp(&text, "completions.completed_at")?);
            }

            habits.push(Habit::from_parts(
                id,
                name,
                description,
                periodicity,
                created_at,
                completions,
            )?);
        }

        Ok(habits)
    }

    fn update_habit(&self, id: HabitId, name: &str, description: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE habits SET name = ?1, description = ?2 WHERE uuid = ?3;",
                params![name, description, id.to_string()],
            )
            .map_err(|err| map_name_conflict(err, name))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn append_completion(&self, id: HabitId, at: NaiveDateTime) -> RepoResult<()> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM habits WHERE uuid = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.conn.execute(
            "INSERT INTO completions (habit_uuid, completed_at) VALUES (?1, ?2);",
            params![id.to_string(), format_timestamp(at)],
        )?;
        Ok(())
    }

    fn delete_habit(&self, id: HabitId) -> RepoResult<()> {
        // completions rows go with the habit via ON DELETE CASCADE.
        let changed = self.conn.execute(
            "DELETE FROM habits WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(text: &str, column: &str) -> RepoResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{text}` in {column}")))
}

fn parse_habit_id(text: &str) -> RepoResult<HabitId> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in habits.uuid")))
}

fn map_name_conflict(err: rusqlite::Error, name: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.code == ErrorCode::ConstraintViolation {
            return RepoError::NameConflict(name.to_string());
        }
    }
    err.into()
}
