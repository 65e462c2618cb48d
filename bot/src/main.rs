//! Heist Bot
//!
//! Robbery mini-game for Discord servers running the UnbelievaBoat economy.
//! Uses hexagonal (ports & adapters) architecture: the game core only talks to
//! port traits, adapters speak Discord REST and the UnbelievaBoat API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

use adapters::{DiscordClient, ThreadDice, TokioPacer, UnbelievaBoatClient};
use app::RobberyService;
use config::Config;

pub type HeistService = RobberyService<DiscordClient, UnbelievaBoatClient, TokioPacer, ThreadDice>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub robbery: Arc<HeistService>,
    pub discord: Arc<DiscordClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let discord = Arc::new(DiscordClient::new(
            &config.discord_api_url,
            &config.discord_token,
            &config.application_id,
        )?);
        let economy = Arc::new(UnbelievaBoatClient::new(
            &config.unbelievaboat_api_url,
            &config.unbelievaboat_token,
        )?);

        let robbery = Arc::new(RobberyService::new(
            discord.clone(),
            economy,
            Arc::new(TokioPacer),
            Arc::new(ThreadDice),
            config.tier_roles.clone(),
            config.narration_delay,
        )
        .with_bound(config.command_timeout));

        Ok(Self {
            robbery,
            discord,
            config,
        })
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        // Keep-alive (no auth)
        .route("/health", get(handlers::health))
        // Relayed interactions (signature verification)
        .route("/interactions", post(handlers::post_interaction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,heist_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting heist bot...");

    let config = Config::from_env()?;
    tracing::info!(
        high_tier = %config.tier_roles.high_tier,
        shotgun = %config.tier_roles.shotgun,
        submachine_gun = %config.tier_roles.submachine_gun,
        pistol = %config.tier_roles.pistol,
        narration_delay_ms = config.narration_delay.as_millis() as u64,
        command_timeout_secs = config.command_timeout.as_secs(),
        relay_signed = config.relay_secret.is_some(),
        "Configuration loaded"
    );
    if config.relay_secret.is_none() {
        tracing::warn!("RELAY_SECRET not set, relayed interactions are accepted unsigned");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config)?;
    let app = app_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
