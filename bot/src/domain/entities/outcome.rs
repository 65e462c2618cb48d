//! Outcome domain entity
//!
//! The single resolved result of one invocation, plus the balance mutations
//! it implies.

/// Who a mutation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Attacker,
    Target,
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::Attacker => write!(f, "attacker"),
            Party::Target => write!(f, "target"),
        }
    }
}

/// Whether cash is credited or debited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Add,
    Remove,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Add => write!(f, "add"),
            Direction::Remove => write!(f, "remove"),
        }
    }
}

/// One planned balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationLeg {
    pub party: Party,
    pub amount: u64,
    pub direction: Direction,
    /// Only attempted if the previous leg succeeded
    pub requires_previous: bool,
}

impl MutationLeg {
    fn debit(party: Party, amount: u64) -> Self {
        Self {
            party,
            amount,
            direction: Direction::Remove,
            requires_previous: false,
        }
    }
}

/// Narrative and monetary result of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Caller lacks the gate role
    Forbidden,
    SelfTarget,
    BotTarget,
    NoValidTargets,
    /// Target fought back; only the attacker pays
    Defended { penalty: u64 },
    /// Both sides pay independently drawn penalties
    Standoff {
        attacker_penalty: u64,
        target_penalty: u64,
    },
    /// Attacker backed off; no money moves
    Evaded,
    /// Cash moves from target to attacker
    Robbed { amount: u64 },
}

impl Outcome {
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Outcome::Forbidden | Outcome::SelfTarget | Outcome::BotTarget | Outcome::NoValidTargets
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Forbidden => "forbidden",
            Outcome::SelfTarget => "self_target",
            Outcome::BotTarget => "bot_target",
            Outcome::NoValidTargets => "no_valid_targets",
            Outcome::Defended { .. } => "defended",
            Outcome::Standoff { .. } => "standoff",
            Outcome::Evaded => "evaded",
            Outcome::Robbed { .. } => "robbed",
        }
    }

    /// Balance mutations in the order they must be attempted
    pub fn mutation_plan(&self) -> Vec<MutationLeg> {
        match *self {
            Outcome::Defended { penalty } => vec![MutationLeg::debit(Party::Attacker, penalty)],
            Outcome::Standoff {
                attacker_penalty,
                target_penalty,
            } => vec![
                MutationLeg::debit(Party::Attacker, attacker_penalty),
                MutationLeg::debit(Party::Target, target_penalty),
            ],
            // The target is debited first; the attacker is only paid from a successful debit
            Outcome::Robbed { amount } => vec![
                MutationLeg::debit(Party::Target, amount),
                MutationLeg {
                    party: Party::Attacker,
                    amount,
                    direction: Direction::Add,
                    requires_previous: true,
                },
            ],
            Outcome::Forbidden
            | Outcome::SelfTarget
            | Outcome::BotTarget
            | Outcome::NoValidTargets
            | Outcome::Evaded => Vec::new(),
        }
    }
}
