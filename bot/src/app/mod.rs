//! Application layer
//!
//! Contains the game pipeline and its orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod balance_mutator;
pub mod narration;
pub mod outcome_engine;
pub mod payout_config;
pub mod reply;
pub mod robbery_service;
pub mod role_resolver;
pub mod summary;
pub mod target_selector;

pub use robbery_service::{InvocationReport, RobberyService, Stage};
