//! Discord REST client implementation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{GuildId, GuildSnapshot, Participant, UserId};
use crate::domain::ports::GuildDirectory;
use crate::error::DiscordError;

/// Largest page the member list endpoint returns
const MEMBER_PAGE_SIZE: usize = 1000;

/// Stop paginating after this many pages
const MAX_MEMBER_PAGES: usize = 25;

/// Per-request bound, so a stalled call fails instead of hanging the invocation
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Implementation of the Discord REST client
pub struct DiscordClient {
    http: Client,
    base_url: String,
    application_id: String,
}

impl DiscordClient {
    pub fn new(base_url: &str, bot_token: &str, application_id: &str) -> Result<Self, DiscordError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {}", bot_token))
            .map_err(|_| DiscordError::Unauthorized)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(concat!("heist-bot/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            application_id: application_id.to_string(),
        })
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, DiscordError> {
        let response = self.http.get(self.api_url(path)).send().await?;
        self.handle_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), DiscordError> {
        let response = self.http.post(self.api_url(path)).json(body).send().await?;
        self.handle_empty_response(response).await
    }

    /// Initial response to an interaction
    pub async fn create_interaction_response(
        &self,
        interaction_id: &str,
        token: &str,
        message: &MessagePayload<'_>,
    ) -> Result<(), DiscordError> {
        let body = InteractionCallback {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: message,
        };
        self.post_json(&format!("/interactions/{}/{}/callback", interaction_id, token), &body)
            .await
    }

    /// Acknowledge an interaction now and answer through follow-ups later
    pub async fn create_deferred_response(
        &self,
        interaction_id: &str,
        token: &str,
    ) -> Result<(), DiscordError> {
        let body = DeferredCallback {
            kind: DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE,
        };
        self.post_json(&format!("/interactions/{}/{}/callback", interaction_id, token), &body)
            .await
    }

    /// Follow-up message through the interaction webhook
    pub async fn create_followup_message(
        &self,
        token: &str,
        message: &MessagePayload<'_>,
    ) -> Result<(), DiscordError> {
        self.post_json(&format!("/webhooks/{}/{}", self.application_id, token), message)
            .await
    }

    pub async fn list_roles(&self, guild_id: GuildId) -> Result<Vec<RoleDto>, DiscordError> {
        self.get_json(&format!("/guilds/{}/roles", guild_id)).await
    }

    /// Every member of the guild, following the `after` cursor
    pub async fn list_members(&self, guild_id: GuildId) -> Result<Vec<MemberDto>, DiscordError> {
        let mut members: Vec<MemberDto> = Vec::new();
        let mut after = 0u64;

        for _ in 0..MAX_MEMBER_PAGES {
            let page: Vec<MemberDto> = self
                .get_json(&format!(
                    "/guilds/{}/members?limit={}&after={}",
                    guild_id, MEMBER_PAGE_SIZE, after
                ))
                .await?;

            let full_page = page.len() == MEMBER_PAGE_SIZE;
            if let Some(last) = page.iter().map(|m| m.user.id.0).max() {
                after = last;
            }
            members.extend(page);

            if !full_page {
                return Ok(members);
            }
        }

        tracing::warn!(
            guild_id = %guild_id,
            fetched = members.len(),
            "Member list truncated"
        );
        Ok(members)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, DiscordError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| DiscordError::Deserialization(e.to_string()))
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), DiscordError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn error_for(response: reqwest::Response) -> DiscordError {
        match response.status().as_u16() {
            401 => DiscordError::Unauthorized,
            429 => DiscordError::RateLimited,
            status => DiscordError::Api {
                status,
                message: response.text().await.unwrap_or_default(),
            },
        }
    }
}

#[async_trait]
impl GuildDirectory for DiscordClient {
    async fn snapshot(&self, guild_id: GuildId) -> Result<GuildSnapshot, DiscordError> {
        let roles = self.list_roles(guild_id).await?;
        let members = self.list_members(guild_id).await?;

        tracing::debug!(
            guild_id = %guild_id,
            roles = roles.len(),
            members = members.len(),
            "Fetched guild snapshot"
        );

        Ok(build_snapshot(roles, members))
    }
}

/// Resolve member role ids to names. Ids with no matching role are dropped.
fn build_snapshot(roles: Vec<RoleDto>, members: Vec<MemberDto>) -> GuildSnapshot {
    let names: HashMap<&str, &str> = roles
        .iter()
        .map(|r| (r.id.as_str(), r.name.as_str()))
        .collect();

    let members = members
        .iter()
        .map(|m| {
            let mut participant = Participant::new(m.user.id, m.display_name());
            participant.is_bot = m.user.bot;
            participant.role_set = m
                .roles
                .iter()
                .filter_map(|id| names.get(id.as_str()))
                .map(|name| name.to_string())
                .collect();
            participant
        })
        .collect();

    GuildSnapshot {
        role_names: roles.into_iter().map(|r| r.name).collect(),
        members,
    }
}

// ============================================================================
// Discord API types
// ============================================================================

const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;
const DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE: u8 = 5;
const EPHEMERAL_FLAG: u64 = 1 << 6;

#[derive(Debug, Serialize)]
struct InteractionCallback<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: u8,
    data: &'a T,
}

#[derive(Debug, Serialize)]
struct DeferredCallback {
    #[serde(rename = "type")]
    kind: u8,
}

#[derive(Debug, Serialize)]
pub struct AllowedMentions {
    parse: [&'static str; 1],
}

/// Message body shared by interaction responses and follow-ups
#[derive(Debug, Serialize)]
pub struct MessagePayload<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
    allowed_mentions: AllowedMentions,
}

impl<'a> MessagePayload<'a> {
    pub fn new(content: &'a str, ephemeral: bool) -> Self {
        Self {
            content,
            flags: ephemeral.then_some(EPHEMERAL_FLAG),
            allowed_mentions: AllowedMentions { parse: ["users"] },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
    #[serde(with = "snowflake")]
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Deserialize)]
pub struct MemberDto {
    pub user: UserDto,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl MemberDto {
    /// Guild nickname, then global display name, then username
    fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .or(self.user.global_name.as_deref())
            .unwrap_or(&self.user.username)
    }
}

/// Discord sends snowflakes as strings
mod snowflake {
    use serde::{Deserialize, Deserializer};

    use crate::domain::entities::UserId;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UserId, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
