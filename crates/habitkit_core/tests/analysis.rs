use chrono::{NaiveDate, NaiveDateTime};
use habitkit_core::{analysis, Habit, Periodicity};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn habit(name: &str, periodicity: Periodicity, days: &[(i32, u32, u32)]) -> Habit {
    let mut habit = Habit::new(name, "", periodicity).unwrap();
    for (y, m, d) in days {
        assert!(habit.check_off_at(at(*y, *m, *d)).is_recorded());
    }
    habit
}

fn sample_collection() -> Vec<Habit> {
    vec![
        habit("Read", Periodicity::Daily, &[(2023, 9, 14), (2023, 9, 15)]),
        habit("Exercise", Periodicity::Weekly, &[(2023, 9, 12)]),
        habit(
            "Meditate",
            Periodicity::Daily,
            &[(2023, 9, 13), (2023, 9, 14), (2023, 9, 15)],
        ),
        habit("Review budget", Periodicity::Weekly, &[]),
        habit("Journal", Periodicity::Daily, &[(2023, 9, 15)]),
    ]
}

#[test]
fn names_preserve_input_order() {
    let habits = sample_collection();
    assert_eq!(
        analysis::names(&habits),
        vec!["Read", "Exercise", "Meditate", "Review budget", "Journal"]
    );
}

#[test]
fn filter_by_periodicity_splits_three_daily_two_weekly() {
    let habits = sample_collection();

    let daily = analysis::filter_by_periodicity(&habits, Periodicity::Daily);
    let weekly = analysis::filter_by_periodicity(&habits, Periodicity::Weekly);

    assert_eq!(daily.len(), 3);
    assert_eq!(weekly.len(), 2);

    let daily_names: Vec<_> = daily.iter().map(|h| h.name()).collect();
    assert_eq!(daily_names, vec!["Read", "Meditate", "Journal"]);
    let weekly_names: Vec<_> = weekly.iter().map(|h| h.name()).collect();
    assert_eq!(weekly_names, vec!["Exercise", "Review budget"]);
}

#[test]
fn filter_does_not_mutate_the_collection() {
    let habits = sample_collection();
    let before: Vec<_> = habits.iter().map(|h| h.completion_count()).collect();
    let _ = analysis::filter_by_periodicity(&habits, Periodicity::Daily);
    let after: Vec<_> = habits.iter().map(|h| h.completion_count()).collect();
    assert_eq!(before, after);
}

#[test]
fn habit_with_longest_streak_picks_the_maximum() {
    let habits = sample_collection();
    let best = analysis::habit_with_longest_streak(&habits).unwrap();
    assert_eq!(best.name(), "Meditate");
    assert_eq!(analysis::streak_for(best), 3);
}

#[test]
fn habit_with_longest_streak_breaks_ties_by_input_order() {
    let habits = vec![
        habit("First", Periodicity::Daily, &[(2023, 9, 14), (2023, 9, 15)]),
        habit("Second", Periodicity::Daily, &[(2023, 9, 14), (2023, 9, 15)]),
    ];
    let best = analysis::habit_with_longest_streak(&habits).unwrap();
    assert_eq!(best.name(), "First");
}

#[test]
fn habit_with_longest_streak_on_empty_input_is_none() {
    assert!(analysis::habit_with_longest_streak(&[]).is_none());
}

#[test]
fn pass_throughs_match_habit_methods() {
    let habits = sample_collection();
    for habit in &habits {
        assert_eq!(analysis::streak_for(habit), habit.streak());
        assert_eq!(analysis::longest_streak_for(habit), habit.longest_streak());
        assert_eq!(analysis::completion_count(habit), habit.completion_count());
    }
}
