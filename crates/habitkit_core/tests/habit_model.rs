use chrono::NaiveDate;
use habitkit_core::{Habit, HabitValidationError, Periodicity};
use uuid::Uuid;

#[test]
fn new_habit_sets_defaults() {
    let habit = Habit::new("Read", "ten pages", Periodicity::Daily).unwrap();

    assert!(!habit.id().is_nil());
    assert_eq!(habit.name(), "Read");
    assert_eq!(habit.description(), "ten pages");
    assert_eq!(habit.periodicity(), Periodicity::Daily);
    assert!(habit.completions().is_empty());
}

#[test]
fn blank_names_are_rejected_at_construction_and_edit() {
    assert_eq!(
        Habit::new("", "x", Periodicity::Weekly).unwrap_err(),
        HabitValidationError::BlankName
    );

    let mut habit = Habit::new("Run", "", Periodicity::Weekly).unwrap();
    assert_eq!(
        habit.edit("  ", "y").unwrap_err(),
        HabitValidationError::BlankName
    );
}

#[test]
fn habit_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let created = NaiveDate::from_ymd_opt(2023, 9, 1)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    let completion = NaiveDate::from_ymd_opt(2023, 9, 15)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();
    let habit = Habit::from_parts(
        id,
        "Exercise",
        "gym session",
        Periodicity::Weekly,
        created,
        vec![completion],
    )
    .unwrap();

    let json = serde_json::to_value(&habit).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["name"], "Exercise");
    assert_eq!(json["description"], "gym session");
    assert_eq!(json["periodicity"], "weekly");

    let decoded: Habit = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, habit);
}

#[test]
fn from_parts_restores_the_dedup_invariant() {
    let morning = NaiveDate::from_ymd_opt(2023, 9, 15)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let evening = NaiveDate::from_ymd_opt(2023, 9, 15)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap();
    let next_day = NaiveDate::from_ymd_opt(2023, 9, 16)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    // A tampered store could hold two same-day rows; the first one wins.
    let habit = Habit::from_parts(
        Uuid::new_v4(),
        "Read",
        "",
        Periodicity::Daily,
        morning,
        vec![evening, morning, next_day],
    )
    .unwrap();

    assert_eq!(habit.completion_count(), 2);
    assert_eq!(habit.completions()[0], morning);
    assert_eq!(habit.streak(), 2);
}
