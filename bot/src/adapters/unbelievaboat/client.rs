//! UnbelievaBoat API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{GuildId, UserId};
use crate::domain::ports::{Balance, EconomyClient};
use crate::error::EconomyError;

/// Audit reason attached to every balance change
const MUTATION_REASON: &str = "Heist";

/// Per-request bound. A mutation that outlives it reports as failed.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Implementation of the UnbelievaBoat economy client
pub struct UnbelievaBoatClient {
    http: Client,
    base_url: String,
}

impl UnbelievaBoatClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, EconomyError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(token).map_err(|_| EconomyError::Unauthorized)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn user_url(&self, guild_id: GuildId, user_id: UserId) -> String {
        format!("{}/guilds/{}/users/{}", self.base_url, guild_id, user_id)
    }

    /// Change a user's cash by `delta` (negative to remove)
    async fn patch_cash(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        delta: i64,
    ) -> Result<Balance, EconomyError> {
        tracing::debug!(
            guild_id = %guild_id,
            user_id = %user_id,
            delta,
            "Patching UnbelievaBoat balance"
        );

        let response = self
            .http
            .patch(self.user_url(guild_id, user_id))
            .json(&UpdateBalanceRequest {
                cash: delta,
                reason: MUTATION_REASON,
            })
            .send()
            .await?;

        let body: BalanceResponse = self.handle_response(response).await?;
        Ok(body.into())
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, EconomyError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| EconomyError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(EconomyError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(EconomyError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(EconomyError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn signed(amount: u64) -> Result<i64, EconomyError> {
    i64::try_from(amount).map_err(|_| EconomyError::AmountOutOfRange(amount))
}

#[derive(Debug, Serialize)]
struct UpdateBalanceRequest<'a> {
    cash: i64,
    reason: &'a str,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    cash: i64,
    #[serde(default)]
    bank: i64,
    #[serde(default)]
    total: i64,
}

impl From<BalanceResponse> for Balance {
    fn from(r: BalanceResponse) -> Self {
        Balance {
            cash: r.cash,
            bank: r.bank,
            total: r.total,
        }
    }
}

#[async_trait]
impl EconomyClient for UnbelievaBoatClient {
    async fn add_money(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
    ) -> Result<Balance, EconomyError> {
        self.patch_cash(guild_id, user_id, signed(amount)?).await
    }

    async fn remove_money(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
    ) -> Result<Balance, EconomyError> {
        self.patch_cash(guild_id, user_id, -signed(amount)?).await
    }
}
