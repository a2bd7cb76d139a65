//! Predefined example habits.
//!
//! Seeds the store with five habits and four weeks of deterministic
//! completion history relative to today, so streak output is non-trivial
//! right after install. A non-empty store is left untouched.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use habitkit_core::{HabitRepository, HabitService, HabitTracker, Periodicity};

struct SeedHabit {
    name: &'static str,
    description: &'static str,
    periodicity: Periodicity,
    /// Completion offsets in days before today.
    days_ago: &'static [i64],
}

// Daily "Read" is unbroken for four weeks; the others carry gaps so the
// trailing and longest streaks visibly differ.
const SEED_HABITS: &[SeedHabit] = &[
    SeedHabit {
        name: "Read",
        description: "Read at least ten pages",
        periodicity: Periodicity::Daily,
        days_ago: &[
            27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
            5, 4, 3, 2, 1, 0,
        ],
    },
    SeedHabit {
        name: "Meditate",
        description: "Ten minutes of meditation",
        periodicity: Periodicity::Daily,
        days_ago: &[27, 26, 25, 4, 3, 2, 1, 0],
    },
    SeedHabit {
        name: "Drink water",
        description: "Two liters over the day",
        periodicity: Periodicity::Daily,
        days_ago: &[12, 11, 10, 9, 8, 6, 5, 2, 1, 0],
    },
    SeedHabit {
        name: "Exercise",
        description: "One gym session",
        periodicity: Periodicity::Weekly,
        days_ago: &[21, 14, 7, 0],
    },
    SeedHabit {
        name: "Review budget",
        description: "Go through the weekly spending",
        periodicity: Periodicity::Weekly,
        days_ago: &[28, 21, 7, 0],
    },
];

pub fn run<R: HabitRepository>(
    service: &HabitService<R>,
    tracker: &mut HabitTracker,
) -> Result<()> {
    if !tracker.is_empty() {
        println!("Store already has habits; seeding skipped.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    for seed in SEED_HABITS {
        service.create_habit(tracker, seed.name, seed.description, seed.periodicity)?;
        for days_ago in seed.days_ago {
            let at: NaiveDateTime = (today - Duration::days(*days_ago))
                .and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN));
            let _ = service.check_off(tracker, seed.name, Some(at))?;
        }
        println!("Seeded habit '{}' ({}).", seed.name, seed.periodicity);
    }

    Ok(())
}
