use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::app::payout_config::NARRATION_DELAY;
use crate::domain::entities::TierRoleNames;
use crate::error::ConfigError;

const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings. Holds secrets, so no `Debug`.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub application_id: String,
    pub unbelievaboat_token: String,
    pub discord_api_url: String,
    pub unbelievaboat_api_url: String,
    /// Shared secret for relayed interactions (HMAC-SHA256)
    pub relay_secret: Option<String>,
    pub port: u16,
    pub tier_roles: TierRoleNames,
    pub narration_delay: Duration,
    pub command_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let defaults = TierRoleNames::default();
        let tier_roles = TierRoleNames {
            high_tier: or_default("ROLE_WOOZIE", &defaults.high_tier),
            shotgun: or_default("ROLE_SHOTGUN", &defaults.shotgun),
            submachine_gun: or_default("ROLE_UZI", &defaults.submachine_gun),
            pistol: or_default("ROLE_GLOCK", &defaults.pistol),
        };
        tier_roles.validate()?;

        let narration_delay = parsed::<u64>(get("NARRATION_DELAY_MS"), "NARRATION_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(NARRATION_DELAY);

        let command_timeout = match parsed::<u64>(get("COMMAND_TIMEOUT_SECS"), "COMMAND_TIMEOUT_SECS")? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    key: "COMMAND_TIMEOUT_SECS",
                    message: "must be greater than zero".to_string(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_COMMAND_TIMEOUT,
        };

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            application_id: required("DISCORD_APPLICATION_ID")?,
            unbelievaboat_token: required("UNBELIEVABOAT_TOKEN")?,
            discord_api_url: or_default("DISCORD_API_URL", "https://discord.com/api/v10"),
            unbelievaboat_api_url: or_default(
                "UNBELIEVABOAT_API_URL",
                "https://unbelievaboat.com/api/v1",
            ),
            relay_secret: get("RELAY_SECRET"),
            port: parsed(get("PORT"), "PORT")?.unwrap_or(8080),
            tier_roles,
            narration_delay,
            command_timeout,
        })
    }
}

fn parsed<T>(value: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                message: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let mut map = HashMap::new();
        map.insert("DISCORD_TOKEN".to_string(), "discord-token".to_string());
        map.insert("DISCORD_APPLICATION_ID".to_string(), "42".to_string());
        map.insert("UNBELIEVABOAT_TOKEN".to_string(), "ub-token".to_string());
        for (key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.discord_api_url, "https://discord.com/api/v10");
        assert_eq!(config.unbelievaboat_api_url, "https://unbelievaboat.com/api/v1");
        assert!(config.relay_secret.is_none());
        assert_eq!(config.tier_roles, TierRoleNames::default());
        assert_eq!(config.narration_delay, NARRATION_DELAY);
        assert_eq!(config.command_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_apply() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("RELAY_SECRET", "shh"),
            ("ROLE_UZI", "MAC-10"),
            ("NARRATION_DELAY_MS", "0"),
            ("COMMAND_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.relay_secret.as_deref(), Some("shh"));
        assert_eq!(config.tier_roles.submachine_gun, "MAC-10");
        assert_eq!(config.narration_delay, Duration::ZERO);
        assert_eq!(config.command_timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_token_is_reported() {
        let result = Config::from_lookup(|key| match key {
            "DISCORD_APPLICATION_ID" => Some("42".to_string()),
            "UNBELIEVABOAT_TOKEN" => Some("ub".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::Missing("DISCORD_TOKEN"))));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let result = Config::from_lookup(lookup(&[("UNBELIEVABOAT_TOKEN", "  ")]));
        assert!(matches!(result, Err(ConfigError::Missing("UNBELIEVABOAT_TOKEN"))));
    }

    #[test]
    fn invalid_numbers_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("COMMAND_TIMEOUT_SECS", "0")])),
            Err(ConfigError::Invalid {
                key: "COMMAND_TIMEOUT_SECS",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_role_names_rejected() {
        let result = Config::from_lookup(lookup(&[("ROLE_GLOCK", "shotgun")]));
        assert!(matches!(result, Err(ConfigError::Domain(_))));
    }
}
