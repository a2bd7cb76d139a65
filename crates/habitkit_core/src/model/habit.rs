//! Habit domain model and streak engine.
//!
//! # Responsibility
//! - Define the canonical habit record: identity, periodicity, completion log.
//! - Own the dedup rule for check-offs and both streak computations.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `completions` is sorted ascending and holds at most one entry per
//!   period bucket (calendar day for daily habits, ISO week for weekly).
//! - Streak values are always recomputed from the log; there is no cached
//!   counter to drift out of sync.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a habit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = Uuid;

/// Cadence at which a habit is expected to recur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// One qualifying period per calendar day.
    Daily,
    /// One qualifying period per ISO calendar week.
    Weekly,
}

/// Parse failure for periodicity text from the DB or CLI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicityParseError(pub String);

impl Display for PeriodicityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid periodicity `{}`; expected daily|weekly",
            self.0
        )
    }
}

impl Error for PeriodicityParseError {}

impl Periodicity {
    /// Parses the canonical text form used by persistence and the CLI.
    ///
    /// # Errors
    /// - Returns `PeriodicityParseError` for anything but `daily`/`weekly`.
    pub fn parse(value: &str) -> Result<Self, PeriodicityParseError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => Err(PeriodicityParseError(other.to_string())),
        }
    }

    /// Canonical text form, the inverse of [`Periodicity::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Maps a calendar date to the first day of its period bucket.
    ///
    /// Two timestamps fall in the same dedup bucket iff their period starts
    /// are equal; two buckets are consecutive iff their starts are exactly
    /// [`Periodicity::period_days`] apart. Using the Monday of the ISO week
    /// makes the weekly rule hold across ISO year rollovers (week 52/53 of
    /// year Y is followed by week 1 of year Y+1).
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => {
                let week = date.iso_week();
                NaiveDate::from_isoywd_opt(week.year(), week.week(), Weekday::Mon)
                    .expect("ISO week of an existing date is constructible")
            }
        }
    }

    /// Distance in days between the starts of two consecutive buckets.
    pub fn period_days(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
        }
    }
}

impl Display for Periodicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for habit construction and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Habit name is empty or whitespace-only.
    BlankName,
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "habit name must not be blank"),
        }
    }
}

impl Error for HabitValidationError {}

/// Result of a check-off attempt.
///
/// `AlreadyCompleted` is an expected everyday outcome, not a failure:
/// callers routinely probe "can I complete this today?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CheckOffOutcome {
    /// The completion was appended to the log.
    Recorded,
    /// The period bucket already holds a completion; the log is unchanged.
    AlreadyCompleted,
}

impl CheckOffOutcome {
    /// Returns whether the attempt appended a new completion.
    pub fn is_recorded(self) -> bool {
        matches!(self, Self::Recorded)
    }
}

/// A recurring habit with its full completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    name: String,
    description: String,
    periodicity: Periodicity,
    created_at: NaiveDateTime,
    completions: Vec<NaiveDateTime>,
}

impl Habit {
    /// Creates a new habit with a generated stable ID and `created_at` now.
    ///
    /// # Errors
    /// - `BlankName` when the name is empty after trimming.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        periodicity: Periodicity,
    ) -> Result<Self, HabitValidationError> {
        Self::from_parts(
            Uuid::new_v4(),
            name,
            description,
            periodicity,
            Local::now().naive_local(),
            Vec::new(),
        )
    }

    /// Reconstructs a habit from persisted parts.
    ///
    /// Used by the persistence collaborator when loading the store. The
    /// completion log is sorted and stripped of same-bucket duplicates, so
    /// the dedup invariant holds even if the store was written by an older
    /// or foreign tool.
    ///
    /// # Errors
    /// - `BlankName` when the name is empty after trimming.
    pub fn from_parts(
        id: HabitId,
        name: impl Into<String>,
        description: impl Into<String>,
        periodicity: Periodicity,
        created_at: NaiveDateTime,
        completions: Vec<NaiveDateTime>,
    ) -> Result<Self, HabitValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HabitValidationError::BlankName);
        }

        let mut habit = Self {
            id,
            name,
            description: description.into(),
            periodicity,
            created_at,
            completions: Vec::with_capacity(completions.len()),
        };
        let mut sorted = completions;
        sorted.sort_unstable();
        for ts in sorted {
            // Re-applies the dedup rule: first entry of each bucket wins.
            let _ = habit.check_off_at(ts);
        }
        Ok(habit)
    }

    pub fn id(&self) -> HabitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Read-only view of the completion log, sorted ascending.
    ///
    /// Mutation goes through [`Habit::check_off_at`] only, which is what
    /// keeps the one-entry-per-bucket invariant enforceable.
    pub fn completions(&self) -> &[NaiveDateTime] {
        &self.completions
    }

    /// Total number of recorded completions.
    pub fn completion_count(&self) -> usize {
        self.completions.len()
    }

    /// Renames and redescribes the habit in place.
    ///
    /// Periodicity and the completion log are untouched.
    ///
    /// # Errors
    /// - `BlankName` when the new name is empty after trimming.
    pub fn edit(
        &mut self,
        new_name: impl Into<String>,
        new_description: impl Into<String>,
    ) -> Result<(), HabitValidationError> {
        let new_name = new_name.into();
        if new_name.trim().is_empty() {
            return Err(HabitValidationError::BlankName);
        }
        self.name = new_name;
        self.description = new_description.into();
        Ok(())
    }

    /// Records a completion at the current instant.
    pub fn check_off(&mut self) -> CheckOffOutcome {
        self.check_off_at(Local::now().naive_local())
    }

    /// Records a completion at an explicit timestamp.
    ///
    /// Rejected (no-op) when the log already holds a completion in the same
    /// period bucket, regardless of insertion order.
    pub fn check_off_at(&mut self, at: NaiveDateTime) -> CheckOffOutcome {
        let bucket = self.periodicity.period_start(at.date());
        let occupied = self
            .completions
            .iter()
            .any(|ts| self.periodicity.period_start(ts.date()) == bucket);
        if occupied {
            return CheckOffOutcome::AlreadyCompleted;
        }

        let position = self.completions.partition_point(|ts| *ts <= at);
        self.completions.insert(position, at);
        CheckOffOutcome::Recorded
    }

    /// Current (trailing) streak: consecutive periods ending at the most
    /// recent completion.
    ///
    /// A missed period directly before the latest completion truncates the
    /// result to 1; older, longer runs never inflate it. The most recent
    /// completion always counts as a streak of at least 1.
    pub fn streak(&self) -> u32 {
        let starts = self.period_starts();
        let Some(mut current) = starts.last().copied() else {
            return 0;
        };
        let step = self.periodicity.period_days();

        let mut count = 1u32;
        for start in starts.iter().rev().skip(1) {
            if (current - *start).num_days() != step {
                break;
            }
            count += 1;
            current = *start;
        }
        count
    }

    /// Longest-ever streak: the longest run of consecutive periods anywhere
    /// in the log, regardless of how long ago it ended.
    pub fn longest_streak(&self) -> u32 {
        let starts = self.period_starts();
        if starts.is_empty() {
            return 0;
        }
        let step = self.periodicity.period_days();

        let mut longest = 1u32;
        let mut run = 1u32;
        for pair in starts.windows(2) {
            if (pair[1] - pair[0]).num_days() == step {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 1;
            }
        }
        longest
    }

    /// Sorted, deduplicated bucket starts for the whole log.
    ///
    /// The log is already sorted and bucket-unique, but the streak walk
    /// re-sorts and dedups defensively so it stays correct on any input.
    fn period_starts(&self) -> Vec<NaiveDate> {
        let mut starts: Vec<NaiveDate> = self
            .completions
            .iter()
            .map(|ts| self.periodicity.period_start(ts.date()))
            .collect();
        starts.sort_unstable();
        starts.dedup();
        starts
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckOffOutcome, Habit, HabitValidationError, Periodicity};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn periodicity_parse_roundtrip() {
        assert_eq!(Periodicity::parse("daily").unwrap(), Periodicity::Daily);
        assert_eq!(Periodicity::parse(" WEEKLY ").unwrap(), Periodicity::Weekly);
        assert!(Periodicity::parse("fortnightly").is_err());
        assert_eq!(Periodicity::Daily.as_str(), "daily");
    }

    #[test]
    fn weekly_period_start_is_iso_monday() {
        // 2023-09-15 is a Friday in ISO week 37; its Monday is 2023-09-11.
        let start = Periodicity::Weekly.period_start(
            NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(),
        );
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 9, 11).unwrap());
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Habit::new("   ", "desc", Periodicity::Daily).unwrap_err();
        assert_eq!(err, HabitValidationError::BlankName);
    }

    #[test]
    fn from_parts_drops_same_bucket_duplicates() {
        let habit = Habit::from_parts(
            uuid::Uuid::new_v4(),
            "Read",
            "",
            Periodicity::Daily,
            day(2023, 9, 1),
            vec![day(2023, 9, 15), day(2023, 9, 15), day(2023, 9, 16)],
        )
        .unwrap();
        assert_eq!(habit.completion_count(), 2);
    }

    #[test]
    fn check_off_out_of_order_keeps_log_sorted() {
        let mut habit = Habit::new("Read", "", Periodicity::Daily).unwrap();
        assert!(habit.check_off_at(day(2023, 9, 16)).is_recorded());
        assert!(habit.check_off_at(day(2023, 9, 14)).is_recorded());
        assert!(habit.check_off_at(day(2023, 9, 15)).is_recorded());

        let dates: Vec<_> = habit.completions().iter().map(|ts| ts.date()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 9, 14).unwrap(),
                NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(),
                NaiveDate::from_ymd_opt(2023, 9, 16).unwrap(),
            ]
        );
    }

    #[test]
    fn edit_changes_name_only() {
        let mut habit = Habit::new("Read", "ten pages", Periodicity::Daily).unwrap();
        let _ = habit.check_off_at(day(2023, 9, 15));

        habit.edit("Read more", "a chapter").unwrap();
        assert_eq!(habit.name(), "Read more");
        assert_eq!(habit.description(), "a chapter");
        assert_eq!(habit.periodicity(), Periodicity::Daily);
        assert_eq!(habit.completion_count(), 1);

        let err = habit.edit("", "x").unwrap_err();
        assert_eq!(err, HabitValidationError::BlankName);
        assert_eq!(habit.name(), "Read more");
    }

    #[test]
    fn same_day_checkoff_is_rejected_not_an_error() {
        let mut habit = Habit::new("Read", "", Periodicity::Daily).unwrap();
        assert!(habit.check_off_at(day(2023, 9, 15)).is_recorded());
        // Different wall-clock time, same calendar date.
        let evening = NaiveDate::from_ymd_opt(2023, 9, 15)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap();
        assert_eq!(
            habit.check_off_at(evening),
            CheckOffOutcome::AlreadyCompleted
        );
        assert_eq!(habit.completion_count(), 1);
    }
}
