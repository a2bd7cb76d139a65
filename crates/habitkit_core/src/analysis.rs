//! Cross-habit analysis queries.
//!
//! # Responsibility
//! - Provide pure, read-only queries over collections of habits.
//! - Keep presentation callers decoupled from `Habit` method names.
//!
//! # Invariants
//! - No function mutates its input or touches ambient state; results are
//!   deterministic for a given collection.
//! - Filters and listings preserve the input order of the collection.

use crate::model::habit::{Habit, Periodicity};

/// Habit names in input order.
pub fn names(habits: &[Habit]) -> Vec<&str> {
    habits.iter().map(Habit::name).collect()
}

/// The subsequence of habits with the given periodicity, input order kept.
pub fn filter_by_periodicity(habits: &[Habit], periodicity: Periodicity) -> Vec<&Habit> {
    habits
        .iter()
        .filter(|habit| habit.periodicity() == periodicity)
        .collect()
}

/// The habit whose current streak is maximal.
///
/// Ties go to the first habit in input order. Empty input yields `None`,
/// not an error.
pub fn habit_with_longest_streak(habits: &[Habit]) -> Option<&Habit> {
    let mut best: Option<(&Habit, u32)> = None;
    for habit in habits {
        let streak = habit.streak();
        match best {
            // Strict comparison keeps the first habit on ties.
            Some((_, best_streak)) if streak <= best_streak => {}
            _ => best = Some((habit, streak)),
        }
    }
    best.map(|(habit, _)| habit)
}

/// Current streak of one habit.
pub fn streak_for(habit: &Habit) -> u32 {
    habit.streak()
}

/// Longest-ever streak of one habit.
pub fn longest_streak_for(habit: &Habit) -> u32 {
    habit.longest_streak()
}

/// Total completions recorded for one habit.
pub fn completion_count(habit: &Habit) -> usize {
    habit.completion_count()
}
