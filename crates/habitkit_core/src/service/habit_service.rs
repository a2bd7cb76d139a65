//! Habit use-case service.
//!
//! # Responsibility
//! - Orchestrate the in-memory tracker and the persistence collaborator.
//! - Keep presentation callers decoupled from storage details.
//!
//! # Invariants
//! - The in-memory dedup check runs before any completion write; an
//!   `AlreadyCompleted` outcome performs no persistence at all.
//! - Service APIs never bypass repository persistence contracts.

use crate::model::habit::{CheckOffOutcome, Habit, HabitValidationError, Periodicity};
use crate::repo::habit_repo::{HabitRepository, RepoError};
use crate::tracker::{DuplicateHabitName, HabitTracker};
use chrono::{Local, NaiveDateTime};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for habit use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No habit with that name in the tracker.
    HabitNotFound(String),
    /// The requested name collides with an existing habit.
    NameTaken(String),
    /// Domain validation failure (blank name).
    Validation(HabitValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HabitNotFound(name) => write!(f, "habit not found: `{name}`"),
            Self::NameTaken(name) => write!(f, "a habit named `{name}` already exists"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NameConflict(name) => Self::NameTaken(name),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<HabitValidationError> for ServiceError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DuplicateHabitName> for ServiceError {
    fn from(value: DuplicateHabitName) -> Self {
        Self::NameTaken(value.0)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case facade over tracker and repository.
pub struct HabitService<R: HabitRepository> {
    repo: R,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the full habit store into a fresh tracker.
    pub fn load_tracker(&self) -> ServiceResult<HabitTracker> {
        let mut tracker = HabitTracker::new();
        for habit in self.repo.load_all()? {
            tracker.add(habit)?;
        }
        info!(
            "event=tracker_load module=service status=ok habits={}",
            tracker.len()
        );
        Ok(tracker)
    }

    /// Creates and persists a new habit, adding it to the tracker.
    pub fn create_habit(
        &self,
        tracker: &mut HabitTracker,
        name: &str,
        description: &str,
        periodicity: Periodicity,
    ) -> ServiceResult<()> {
        let habit = Habit::new(name, description, periodicity)?;
        // The tracker add guarantees the name is free in memory; the unique
        // index guards against other writers of the same store.
        tracker.add(habit.clone())?;
        self.repo.create_habit(&habit)?;
        info!(
            "event=habit_create module=service status=ok periodicity={}",
            periodicity
        );
        Ok(())
    }

    /// Checks off a habit for the period containing `at` (default: now).
    ///
    /// `AlreadyCompleted` is a normal outcome and writes nothing.
    pub fn check_off(
        &self,
        tracker: &mut HabitTracker,
        name: &str,
        at: Option<NaiveDateTime>,
    ) -> ServiceResult<CheckOffOutcome> {
        let at = at.unwrap_or_else(|| Local::now().naive_local());
        let habit = tracker
            .get_mut(name)
            .ok_or_else(|| ServiceError::HabitNotFound(name.to_string()))?;

        let outcome = habit.check_off_at(at);
        if outcome.is_recorded() {
            self.repo.append_completion(habit.id(), at)?;
        }
        info!(
            "event=habit_check_off module=service status=ok recorded={}",
            outcome.is_recorded()
        );
        Ok(outcome)
    }

    /// Renames/redescribes a habit in tracker and store.
    ///
    /// `None` keeps the current value of that field.
    pub fn edit_habit(
        &self,
        tracker: &mut HabitTracker,
        name: &str,
        new_name: Option<&str>,
        new_description: Option<&str>,
    ) -> ServiceResult<()> {
        let current = tracker
            .get(name)
            .ok_or_else(|| ServiceError::HabitNotFound(name.to_string()))?;
        let id = current.id();
        let next_name = new_name.unwrap_or(current.name()).to_string();
        let next_description = new_description.unwrap_or(current.description()).to_string();

        if let Some(other) = tracker.get(&next_name) {
            if other.id() != id {
                return Err(ServiceError::NameTaken(next_name));
            }
        }

        let habit = tracker
            .get_mut(name)
            .ok_or_else(|| ServiceError::HabitNotFound(name.to_string()))?;
        habit.edit(next_name.clone(), next_description.clone())?;
        self.repo.update_habit(id, &next_name, &next_description)?;
        info!("event=habit_edit module=service status=ok");
        Ok(())
    }

    /// Deletes a habit and its completion history.
    pub fn delete_habit(&self, tracker: &mut HabitTracker, name: &str) -> ServiceResult<()> {
        let habit = tracker
            .remove(name)
            .ok_or_else(|| ServiceError::HabitNotFound(name.to_string()))?;
        self.repo.delete_habit(habit.id())?;
        info!("event=habit_delete module=service status=ok");
        Ok(())
    }
}
