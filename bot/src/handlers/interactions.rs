//! Interaction handlers
//!
//! Slash-command interactions forwarded by the gateway relay.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::adapters::DiscordResponder;
use crate::domain::entities::{CommandVariant, GuildId, Invocation, UserId};
use crate::error::AppError;
use crate::AppState;

const SIGNATURE_HEADER: &str = "x-relay-signature";

const PING: u8 = 1;
const APPLICATION_COMMAND: u8 = 2;

/// Interaction payload as Discord delivers it
#[derive(Debug, Deserialize)]
pub struct InteractionPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub data: Option<CommandData>,
    #[serde(default)]
    pub member: Option<InteractionMember>,
}

#[derive(Debug, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionMember {
    pub user: InteractionUser,
}

#[derive(Debug, Deserialize)]
pub struct InteractionUser {
    pub id: String,
}

impl InteractionPayload {
    /// Parse the command invocation. Commands outside a guild are rejected.
    pub fn to_invocation(&self) -> Result<Invocation, AppError> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("Missing command data".to_string()))?;

        let command: CommandVariant = data
            .name
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown command: {}", data.name)))?;

        let guild_id: GuildId = self
            .guild_id
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Command must be used in a server".to_string()))?
            .parse()
            .map_err(AppError::BadRequest)?;

        let caller_id: UserId = self
            .member
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("Missing invoking member".to_string()))?
            .user
            .id
            .parse()
            .map_err(AppError::BadRequest)?;

        let target_id = data
            .options
            .iter()
            .find(|o| o.name == "target")
            .and_then(|o| o.value.as_ref())
            .map(parse_user_option)
            .transpose()?;

        Ok(Invocation {
            guild_id,
            command,
            caller_id,
            target_id,
        })
    }
}

/// User options arrive as string snowflakes
fn parse_user_option(value: &serde_json::Value) -> Result<UserId, AppError> {
    match value {
        serde_json::Value::String(s) => s.parse().map_err(AppError::BadRequest),
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(UserId)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid user id: {}", n))),
        other => Err(AppError::BadRequest(format!("Invalid user id: {}", other))),
    }
}

/// Raw interaction body, accepted only when the relay signed it.
///
/// With no relay secret configured every body passes through.
pub struct RelayedBody(pub Bytes);

#[async_trait]
impl FromRequest<AppState> for RelayedBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let signature = req
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if let Some(secret) = &state.config.relay_secret {
            if !signed_by(secret, &body, signature.as_deref()) {
                tracing::warn!(
                    signed = signature.is_some(),
                    "Rejected relayed interaction with bad signature"
                );
                return Err(AppError::Unauthorized);
            }
        }

        Ok(Self(body))
    }
}

/// True when `signature` is `sha256=<hex>` of the body's HMAC under `secret`
fn signed_by(secret: &str, body: &[u8], signature: Option<&str>) -> bool {
    let Some(digest) = signature
        .and_then(|s| s.strip_prefix("sha256="))
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
    else {
        return false;
    };

    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&digest).is_ok()
}

/// POST /interactions
///
/// Answers PINGs inline. Robbery commands run on their own task; the player
/// sees results through the interaction callback and follow-ups.
pub async fn post_interaction(
    State(state): State<AppState>,
    RelayedBody(body): RelayedBody,
) -> Result<Response, AppError> {
    let payload: InteractionPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid interaction payload: {}", e)))?;

    match payload.kind {
        PING => Ok(Json(serde_json::json!({ "type": PING })).into_response()),
        APPLICATION_COMMAND => {
            let invocation = payload.to_invocation()?;

            tracing::info!(
                interaction_id = %payload.id,
                guild_id = %invocation.guild_id,
                caller = %invocation.caller_id,
                command = %invocation.command,
                "Received robbery command"
            );

            let responder = Arc::new(DiscordResponder::new(
                state.discord.clone(),
                payload.id,
                payload.token,
            ));
            let service = state.robbery.clone();

            tokio::spawn(async move {
                if let Ok(report) = service.run_supervised(invocation, responder).await {
                    tracing::debug!(
                        guild_id = %invocation.guild_id,
                        caller = %invocation.caller_id,
                        stage = ?report.stage,
                        "Invocation finished"
                    );
                }
            });

            Ok(StatusCode::ACCEPTED.into_response())
        }
        other => Err(AppError::BadRequest(format!(
            "Unsupported interaction type: {}",
            other
        ))),
    }
}
