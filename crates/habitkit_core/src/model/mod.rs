//! Domain model for habit tracking.
//!
//! # Responsibility
//! - Define the canonical habit record used by core business logic.
//! - Keep the one-completion-per-period invariant enforceable through a
//!   single mutation path.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId`.
//! - Completion logs are the single source of truth for streak values.

pub mod habit;
