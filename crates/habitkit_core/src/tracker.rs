//! In-memory habit collection.
//!
//! # Responsibility
//! - Hold the working set of habits in insertion order.
//! - Provide case-insensitive lookup by name.
//!
//! # Invariants
//! - Names are unique under case-insensitive comparison.
//! - Insertion order is preserved, so listings are deterministic.

use crate::model::habit::Habit;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Attempt to add a habit whose name is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateHabitName(pub String);

impl Display for DuplicateHabitName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "a habit named `{}` already exists", self.0)
    }
}

impl Error for DuplicateHabitName {}

/// Insertion-ordered collection of habits with unique names.
///
/// Lookup is case-insensitive, display names keep their original casing.
/// Absent names yield `None` rather than an error.
#[derive(Debug, Default, Clone)]
pub struct HabitTracker {
    habits: Vec<Habit>,
}

impl HabitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a habit, rejecting case-insensitive name collisions.
    pub fn add(&mut self, habit: Habit) -> Result<(), DuplicateHabitName> {
        if self.get(habit.name()).is_some() {
            return Err(DuplicateHabitName(habit.name().to_string()));
        }
        self.habits.push(habit);
        Ok(())
    }

    /// Looks up a habit by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Habit> {
        let wanted = name.to_lowercase();
        self.habits
            .iter()
            .find(|habit| habit.name().to_lowercase() == wanted)
    }

    /// Mutable variant of [`HabitTracker::get`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Habit> {
        let wanted = name.to_lowercase();
        self.habits
            .iter_mut()
            .find(|habit| habit.name().to_lowercase() == wanted)
    }

    /// Removes and returns the habit with the given name, if present.
    ///
    /// The removed habit takes its completion log with it.
    pub fn remove(&mut self, name: &str) -> Option<Habit> {
        let wanted = name.to_lowercase();
        let index = self
            .habits
            .iter()
            .position(|habit| habit.name().to_lowercase() == wanted)?;
        Some(self.habits.remove(index))
    }

    /// All habits in insertion order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::HabitTracker;
    use crate::model::habit::{Habit, Periodicity};

    fn habit(name: &str) -> Habit {
        Habit::new(name, "", Periodicity::Daily).unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive_and_case_preserving() {
        let mut tracker = HabitTracker::new();
        tracker.add(habit("Read")).unwrap();

        assert_eq!(tracker.get("read").unwrap().name(), "Read");
        assert_eq!(tracker.get("READ").unwrap().name(), "Read");
        assert!(tracker.get("write").is_none());
    }

    #[test]
    fn add_rejects_case_insensitive_duplicates() {
        let mut tracker = HabitTracker::new();
        tracker.add(habit("Read")).unwrap();

        let err = tracker.add(habit("read")).unwrap_err();
        assert_eq!(err.0, "read");
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn remove_returns_the_habit_and_preserves_order() {
        let mut tracker = HabitTracker::new();
        tracker.add(habit("Read")).unwrap();
        tracker.add(habit("Run")).unwrap();
        tracker.add(habit("Write")).unwrap();

        let removed = tracker.remove("run").unwrap();
        assert_eq!(removed.name(), "Run");
        assert!(tracker.remove("run").is_none());

        let names: Vec<_> = tracker.habits().iter().map(Habit::name).collect();
        assert_eq!(names, vec!["Read", "Write"]);
    }
}
