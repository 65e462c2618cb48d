//! Settlement domain entity
//!
//! Records what actually happened to each planned balance mutation.

use super::{MutationLeg, Party, UserId};

/// Result of one mutation leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegResult {
    /// Economy service accepted the change and reported the new cash balance
    Applied { balance: i64 },
    Failed,
    /// Not attempted because an earlier leg it depends on failed
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledLeg {
    pub leg: MutationLeg,
    pub user_id: UserId,
    pub result: LegResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStatus {
    /// The outcome moved no money
    NoChange,
    Complete,
    /// Some legs applied, others failed or were skipped
    Partial,
    /// No leg applied
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    pub legs: Vec<SettledLeg>,
}

impl Settlement {
    pub fn status(&self) -> SettlementStatus {
        if self.legs.is_empty() {
            return SettlementStatus::NoChange;
        }

        let applied = self
            .legs
            .iter()
            .filter(|l| matches!(l.result, LegResult::Applied { .. }))
            .count();

        if applied == self.legs.len() {
            SettlementStatus::Complete
        } else if applied == 0 {
            SettlementStatus::Failed
        } else {
            SettlementStatus::Partial
        }
    }

    /// Balance reported by the economy service for `party`, if its leg applied
    pub fn balance_of(&self, party: Party) -> Option<i64> {
        self.legs
            .iter()
            .rev()
            .filter(|l| l.leg.party == party)
            .find_map(|l| match l.result {
                LegResult::Applied { balance } => Some(balance),
                _ => None,
            })
    }

    pub fn leg_for(&self, party: Party) -> Option<&SettledLeg> {
        self.legs.iter().find(|l| l.leg.party == party)
    }
}
