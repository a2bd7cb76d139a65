//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the habit persistence contract consumed by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `NameConflict`)
//!   in addition to DB transport errors.

pub mod habit_repo;
