//! Unified error types for the heist bot
//!
//! This module defines error types for each layer:
//! - `DomainError`: Validation of domain configuration
//! - `EconomyError`: UnbelievaBoat API client errors
//! - `DiscordError`: Discord REST client errors
//! - `RobberyError`: Invocation-level failures, each with user-facing text
//! - `AppError`: HTTP layer errors for the relay endpoints
//! - `ConfigError`: Environment configuration errors

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::UserId;

/// Generic reply for failures whose detail must stay internal
pub const GENERIC_FAILURE_MESSAGE: &str =
    "❌ An unexpected error occurred while trying to rob the target.";

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// UnbelievaBoat API client errors
#[derive(Debug, Error)]
pub enum EconomyError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(u64),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Discord REST client errors
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid bot token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Errors that end a single robbery invocation
#[derive(Debug, Error)]
pub enum RobberyError {
    #[error("Caller lacks the {0} role")]
    Forbidden(String),

    #[error("Caller targeted themselves")]
    SelfTarget,

    #[error("Caller targeted a bot")]
    BotTarget,

    #[error("No eligible targets in guild")]
    NoValidTargets,

    #[error("Member not found: {0}")]
    UnknownMember(UserId),

    #[error("Guild has no role named {0}")]
    Misconfigured(String),

    #[error("Discord error: {0}")]
    Discord(#[from] DiscordError),

    #[error("Invocation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invocation aborted: {0}")]
    Aborted(String),
}

impl RobberyError {
    /// Rejections are expected player mistakes and carry no side effects
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RobberyError::Forbidden(_)
                | RobberyError::SelfTarget
                | RobberyError::BotTarget
                | RobberyError::NoValidTargets
                | RobberyError::UnknownMember(_)
                | RobberyError::Misconfigured(_)
        )
    }

    /// Text shown to the player. Never includes internal error detail.
    pub fn user_message(&self) -> String {
        match self {
            RobberyError::Forbidden(role) => {
                format!("❌ You need the {} role to use this command!", role)
            }
            RobberyError::SelfTarget => "❌ You can't rob yourself!".to_string(),
            RobberyError::BotTarget => "❌ You can't rob a bot!".to_string(),
            RobberyError::NoValidTargets => "❌ No valid targets found!".to_string(),
            RobberyError::UnknownMember(_) => {
                "❌ That member couldn't be found in this server.".to_string()
            }
            RobberyError::Misconfigured(role) => format!(
                "❌ This server is missing the `{}` role needed for this command.",
                role
            ),
            RobberyError::Discord(_) | RobberyError::Timeout(_) | RobberyError::Aborted(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
