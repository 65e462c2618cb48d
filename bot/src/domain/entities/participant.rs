//! Participant domain entity
//!
//! A guild member as seen by one invocation: identity, bot flag and the
//! display names of the roles they hold.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Discord user snowflake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Chat mention markup for this user
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(UserId)
            .map_err(|_| format!("Invalid user id: {}", s))
    }
}

/// Discord guild snowflake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl std::fmt::Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GuildId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(GuildId)
            .map_err(|_| format!("Invalid guild id: {}", s))
    }
}

/// A guild member taking part in an encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: UserId,
    pub display_name: String,
    pub is_bot: bool,
    pub role_set: BTreeSet<String>,
}

impl Participant {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_bot: false,
            role_set: BTreeSet::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role_set.insert(role.into());
        self
    }

    pub fn as_bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    pub fn mention(&self) -> String {
        self.id.mention()
    }

    /// Exact, case-sensitive role lookup
    pub fn has_role(&self, name: &str) -> bool {
        self.role_set.contains(name)
    }

    /// Case-insensitive whole-name role lookup (no substring matching)
    pub fn has_role_ignore_case(&self, name: &str) -> bool {
        self.role_set.iter().any(|r| r.eq_ignore_ascii_case(name))
    }
}

/// Read-only view of a guild, fetched once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub role_names: Vec<String>,
    pub members: Vec<Participant>,
}

impl GuildSnapshot {
    pub fn member(&self, id: UserId) -> Option<&Participant> {
        self.members.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_format() {
        assert_eq!(UserId(42).mention(), "<@42>");
    }

    #[test]
    fn parse_ids() {
        assert_eq!("123".parse::<UserId>().unwrap(), UserId(123));
        assert_eq!(" 9 ".parse::<GuildId>().unwrap(), GuildId(9));
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn exact_role_lookup_is_case_sensitive() {
        let p = Participant::new(UserId(1), "a").with_role("Woozie");
        assert!(p.has_role("Woozie"));
        assert!(!p.has_role("woozie"));
    }

    #[test]
    fn ignore_case_lookup_matches_whole_name_only() {
        let p = Participant::new(UserId(1), "a").with_role("SHOTGUN");
        assert!(p.has_role_ignore_case("shotgun"));

        let q = Participant::new(UserId(2), "b").with_role("Sawed-off Shotgun");
        assert!(!q.has_role_ignore_case("shotgun"));
    }

    #[test]
    fn snapshot_member_lookup() {
        let snapshot = GuildSnapshot {
            role_names: vec!["Uzi".to_string()],
            members: vec![Participant::new(UserId(7), "seven")],
        };
        assert!(snapshot.member(UserId(7)).is_some());
        assert!(snapshot.member(UserId(8)).is_none());
    }
}
