//! Core domain logic for habitkit.
//! This crate is the single source of truth for habit business invariants.

pub mod analysis;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod tracker;

pub use logging::{default_log_level, init_logging};
pub use model::habit::{
    CheckOffOutcome, Habit, HabitId, HabitValidationError, Periodicity, PeriodicityParseError,
};
pub use repo::habit_repo::{HabitRepository, RepoError, RepoResult, SqliteHabitRepository};
pub use service::habit_service::{HabitService, ServiceError, ServiceResult};
pub use tracker::{DuplicateHabitName, HabitTracker};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
