//! Domain layer
//!
//! Contains pure game rules with no external dependencies.
//! - `entities`: Domain models for participants, weapons and outcomes
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
