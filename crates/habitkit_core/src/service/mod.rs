//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate tracker and repository calls into use-case level APIs.
//! - Keep CLI/presentation layers decoupled from storage details.

pub mod habit_service;
