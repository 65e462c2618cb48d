//! Mock implementations of port traits
//!
//! In-memory implementations that record every call so tests can verify
//! ordering and side effects.

use std::collections::{HashMap, VecDeque};
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::entities::{Direction, GuildId, GuildSnapshot, UserId};
use crate::domain::ports::{
    Balance, Dice, EconomyClient, GuildDirectory, InteractionResponder, Pacer,
};
use crate::error::{DiscordError, EconomyError};

/// Starting cash for every user in `RecordingEconomy`
pub const DEFAULT_BALANCE: i64 = 100_000;

// ============================================================================
// In-Memory Guild Directory
// ============================================================================

pub struct InMemoryDirectory {
    snapshot: Option<GuildSnapshot>,
    latency: Option<Duration>,
    panics: bool,
    fetches: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new(snapshot: GuildSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            latency: None,
            panics: false,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Directory whose every fetch fails
    pub fn failing() -> Self {
        Self {
            snapshot: None,
            latency: None,
            panics: false,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Directory that panics mid-fetch
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::failing()
        }
    }

    /// Sleep before answering each fetch
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildDirectory for InMemoryDirectory {
    async fn snapshot(&self, _guild_id: GuildId) -> Result<GuildSnapshot, DiscordError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.panics {
            panic!("directory exploded");
        }
        self.snapshot.clone().ok_or(DiscordError::Api {
            status: 503,
            message: "directory unavailable".to_string(),
        })
    }
}

// ============================================================================
// Recording Economy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyCall {
    pub guild_id: GuildId,
    pub user_id: UserId,
    pub amount: u64,
    pub direction: Direction,
}

/// Economy that keeps balances in memory. Balances may go negative.
#[derive(Default)]
pub struct RecordingEconomy {
    balances: Arc<RwLock<HashMap<UserId, i64>>>,
    failures: Vec<(UserId, Direction)>,
    latency: Option<Duration>,
    calls: Arc<RwLock<Vec<EconomyCall>>>,
}

impl RecordingEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(self, user_id: UserId, cash: i64) -> Self {
        self.balances.write().unwrap().insert(user_id, cash);
        self
    }

    /// Reject every `direction` mutation for `user_id`
    pub fn failing_for(mut self, user_id: UserId, direction: Direction) -> Self {
        self.failures.push((user_id, direction));
        self
    }

    /// Sleep before applying each mutation
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<EconomyCall> {
        self.calls.read().unwrap().clone()
    }

    async fn settle_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn mutate(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
        direction: Direction,
    ) -> Result<Balance, EconomyError> {
        self.calls.write().unwrap().push(EconomyCall {
            guild_id,
            user_id,
            amount,
            direction,
        });

        if self.failures.contains(&(user_id, direction)) {
            return Err(EconomyError::Api {
                status: 400,
                message: "mutation rejected".to_string(),
            });
        }

        let mut balances = self.balances.write().unwrap();
        let cash = balances.entry(user_id).or_insert(DEFAULT_BALANCE);
        match direction {
            Direction::Add => *cash += amount as i64,
            Direction::Remove => *cash -= amount as i64,
        }
        Ok(Balance {
            cash: *cash,
            bank: 0,
            total: *cash,
        })
    }
}

#[async_trait]
impl EconomyClient for RecordingEconomy {
    async fn add_money(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
    ) -> Result<Balance, EconomyError> {
        self.settle_latency().await;
        self.mutate(guild_id, user_id, amount, Direction::Add)
    }

    async fn remove_money(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: u64,
    ) -> Result<Balance, EconomyError> {
        self.settle_latency().await;
        self.mutate(guild_id, user_id, amount, Direction::Remove)
    }
}

// ============================================================================
// Recording Responder
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Initial,
    Deferred,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub content: String,
    pub ephemeral: bool,
    pub kind: MessageKind,
}

/// Responder that records delivered messages.
///
/// Follow-ups fail until an initial or deferred response has been delivered,
/// as they do against Discord. Failed sends are not recorded.
#[derive(Default)]
pub struct RecordingResponder {
    messages: Mutex<Vec<SentMessage>>,
    fail_initial: bool,
    fail_follow_ups: bool,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_initial() -> Self {
        Self {
            fail_initial: true,
            ..Self::default()
        }
    }

    pub fn failing_follow_ups() -> Self {
        Self {
            fail_follow_ups: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn respond(&self, content: &str, ephemeral: bool) -> Result<(), DiscordError> {
        if self.fail_initial {
            return Err(DiscordError::Api {
                status: 404,
                message: "Unknown interaction".to_string(),
            });
        }
        self.messages.lock().unwrap().push(SentMessage {
            content: content.to_string(),
            ephemeral,
            kind: MessageKind::Initial,
        });
        Ok(())
    }

    async fn defer(&self) -> Result<(), DiscordError> {
        if self.fail_initial {
            return Err(DiscordError::Api {
                status: 404,
                message: "Unknown interaction".to_string(),
            });
        }
        self.messages.lock().unwrap().push(SentMessage {
            content: String::new(),
            ephemeral: false,
            kind: MessageKind::Deferred,
        });
        Ok(())
    }

    async fn follow_up(&self, content: &str) -> Result<(), DiscordError> {
        let mut messages = self.messages.lock().unwrap();
        let acknowledged = messages.iter().any(|m| m.kind != MessageKind::FollowUp);
        if self.fail_follow_ups || !acknowledged {
            return Err(DiscordError::Api {
                status: 404,
                message: "Unknown Webhook".to_string(),
            });
        }
        messages.push(SentMessage {
            content: content.to_string(),
            ephemeral: false,
            kind: MessageKind::FollowUp,
        });
        Ok(())
    }
}

// ============================================================================
// Recording Pacer
// ============================================================================

/// Pacer that records requested pauses without sleeping
#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}

// ============================================================================
// Scripted Dice
// ============================================================================

/// Dice returning preset values in order, then the low end of each range
pub struct ScriptedDice {
    values: Mutex<VecDeque<u64>>,
    requested: Mutex<Vec<RangeInclusive<u64>>>,
}

impl ScriptedDice {
    pub fn new(values: &[u64]) -> Self {
        Self {
            values: Mutex::new(values.iter().copied().collect()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Ranges rolled so far, in order
    pub fn requested(&self) -> Vec<RangeInclusive<u64>> {
        self.requested.lock().unwrap().clone()
    }
}

impl Dice for ScriptedDice {
    fn roll(&self, range: RangeInclusive<u64>) -> u64 {
        let value = self
            .values
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(*range.start());
        self.requested.lock().unwrap().push(range);
        value
    }
}
