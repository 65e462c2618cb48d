//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::{
    CommandVariant, GuildId, GuildSnapshot, Invocation, Participant, TierRoleNames, UserId,
};
use crate::AppState;

/// Guild every fixture invocation runs in
pub const TEST_GUILD: GuildId = GuildId(10);

/// Create an unarmed, human member
pub fn test_member(id: u64) -> Participant {
    Participant::new(UserId(id), format!("member-{}", id))
}

/// Create a bot member
pub fn test_bot(id: u64) -> Participant {
    Participant::new(UserId(id), format!("bot-{}", id)).as_bot()
}

/// Create a member holding the given role names
pub fn armed(id: u64, roles: &[&str]) -> Participant {
    roles
        .iter()
        .fold(test_member(id), |member, role| member.with_role(*role))
}

/// Role names of a guild set up with the default tier roles
pub fn guild_role_names() -> Vec<String> {
    let tiers = TierRoleNames::default();
    vec![
        "@everyone".to_string(),
        tiers.high_tier,
        tiers.shotgun,
        tiers.submachine_gun,
        tiers.pistol,
        "Moderator".to_string(),
    ]
}

/// Create a guild snapshot with the default tier roles and `members`
pub fn test_snapshot(members: Vec<Participant>) -> GuildSnapshot {
    GuildSnapshot {
        role_names: guild_role_names(),
        members,
    }
}

/// Create an invocation of `command` by `caller`
pub fn test_invocation(
    command: CommandVariant,
    caller: &Participant,
    target: Option<&Participant>,
) -> Invocation {
    Invocation {
        guild_id: TEST_GUILD,
        command,
        caller_id: caller.id,
        target_id: target.map(|t| t.id),
    }
}

/// Create a config whose external APIs point at an unroutable address
pub fn test_config(relay_secret: Option<&str>) -> Config {
    Config {
        discord_token: "discord-test-token".to_string(),
        application_id: "42".to_string(),
        unbelievaboat_token: "ub-test-token".to_string(),
        discord_api_url: "http://127.0.0.1:9".to_string(),
        unbelievaboat_api_url: "http://127.0.0.1:9".to_string(),
        relay_secret: relay_secret.map(str::to_string),
        port: 0,
        tier_roles: TierRoleNames::default(),
        narration_delay: Duration::ZERO,
        command_timeout: Duration::from_secs(1),
    }
}

/// Create app state backed by `test_config`
pub fn test_state(relay_secret: Option<&str>) -> AppState {
    AppState::new(test_config(relay_secret)).unwrap()
}
