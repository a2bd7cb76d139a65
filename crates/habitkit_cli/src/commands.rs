//! Subcommand handlers: parse user input, call core, print results.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use habitkit_core::{
    analysis, CheckOffOutcome, Habit, HabitRepository, HabitService, HabitTracker, Periodicity,
};

pub fn add<R: HabitRepository>(
    service: &HabitService<R>,
    tracker: &mut HabitTracker,
    name: &str,
    description: &str,
    periodicity: Periodicity,
) -> Result<()> {
    service.create_habit(tracker, name, description, periodicity)?;
    println!("Habit '{name}' added ({periodicity}).");
    Ok(())
}

pub fn done<R: HabitRepository>(
    service: &HabitService<R>,
    tracker: &mut HabitTracker,
    name: &str,
    on: Option<&str>,
) -> Result<()> {
    let at = on.map(parse_date).transpose()?;
    let outcome = service.check_off(tracker, name, at)?;

    // Unwrap is safe: check_off just found the habit by this name.
    let habit = tracker.get(name).context("habit disappeared from tracker")?;
    match outcome {
        CheckOffOutcome::Recorded => {
            println!(
                "Marked '{}' as complete. Current streak: {}.",
                habit.name(),
                habit.streak()
            );
        }
        CheckOffOutcome::AlreadyCompleted => {
            let period = match habit.periodicity() {
                Periodicity::Daily => "today",
                Periodicity::Weekly => "this week",
            };
            println!(
                "'{}' has already been marked complete {period}.",
                habit.name()
            );
        }
    }
    Ok(())
}

pub fn list(tracker: &HabitTracker, periodicity: Option<Periodicity>) {
    let habits = tracker.habits();
    let selected: Vec<&Habit> = match periodicity {
        Some(periodicity) => analysis::filter_by_periodicity(habits, periodicity),
        None => habits.iter().collect(),
    };

    if selected.is_empty() {
        println!("No habits found.");
        return;
    }
    for habit in selected {
        println!(
            "{} [{}] - streak: {}",
            habit.name(),
            habit.periodicity(),
            analysis::streak_for(habit)
        );
    }
}

pub fn show(tracker: &HabitTracker, name: &str) {
    let Some(habit) = tracker.get(name) else {
        println!("Habit not found.");
        return;
    };

    println!("Habit: {}", habit.name());
    println!("Description: {}", habit.description());
    println!("Periodicity: {}", habit.periodicity());
    println!("Created: {}", habit.created_at().format("%Y-%m-%d"));
    println!("Completions: {}", analysis::completion_count(habit));
    println!("Current streak: {}", analysis::streak_for(habit));
    println!("Longest streak: {}", analysis::longest_streak_for(habit));
    if !habit.completions().is_empty() {
        let dates: Vec<String> = habit
            .completions()
            .iter()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .collect();
        println!("History: {}", dates.join(", "));
    }
}

pub fn streaks(tracker: &HabitTracker) {
    if tracker.is_empty() {
        println!("No habits found.");
        return;
    }
    for habit in tracker.habits() {
        println!(
            "{} - current: {}, longest: {}",
            habit.name(),
            analysis::streak_for(habit),
            analysis::longest_streak_for(habit)
        );
    }
}

pub fn longest(tracker: &HabitTracker) {
    match analysis::habit_with_longest_streak(tracker.habits()) {
        Some(habit) => println!(
            "The habit with the longest streak is '{}' with a streak of {}.",
            habit.name(),
            analysis::streak_for(habit)
        ),
        None => println!("No habits found."),
    }
}

pub fn edit<R: HabitRepository>(
    service: &HabitService<R>,
    tracker: &mut HabitTracker,
    name: &str,
    rename: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    service.edit_habit(tracker, name, rename, description)?;
    println!("Habit '{name}' updated.");
    Ok(())
}

pub fn delete<R: HabitRepository>(
    service: &HabitService<R>,
    tracker: &mut HabitTracker,
    name: &str,
) -> Result<()> {
    service.delete_habit(tracker, name)?;
    println!("Habit '{name}' deleted.");
    Ok(())
}

fn parse_date(text: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date `{text}`; expected YYYY-MM-DD"))?;
    Ok(date.and_time(NaiveTime::MIN))
}
