//! Result summary
//!
//! Final message of a resolved encounter. Balances are only ever quoted from
//! legs the economy service confirmed.

use crate::app::narration::Scene;
use crate::domain::entities::{LegResult, Outcome, Party, SettledLeg, Settlement, SettlementStatus};

/// Format cash with thousands separators, e.g. `-1,234,567`
pub fn format_cash(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if amount < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

fn cash(amount: u64) -> String {
    format_cash(i64::try_from(amount).unwrap_or(i64::MAX))
}

fn name<'a>(scene: &'a Scene, party: Party) -> &'a str {
    match party {
        Party::Attacker => &scene.attacker,
        Party::Target => &scene.target,
    }
}

fn penalty_line(scene: &Scene, leg: &SettledLeg) -> String {
    let who = name(scene, leg.leg.party);
    match leg.result {
        LegResult::Applied { balance } => format!(
            "{} paid ${} (new balance: ${})",
            who,
            cash(leg.leg.amount),
            format_cash(balance)
        ),
        LegResult::Failed => format!("{}'s ${} bill couldn't be charged", who, cash(leg.leg.amount)),
        LegResult::Skipped => format!("{}'s ${} bill was not charged", who, cash(leg.leg.amount)),
    }
}

pub fn render_summary(outcome: &Outcome, settlement: &Settlement, scene: &Scene) -> String {
    let a = &scene.attacker;
    let t = &scene.target;
    let status = settlement.status();

    match *outcome {
        Outcome::Robbed { amount } => match (
            status,
            settlement.balance_of(Party::Target),
            settlement.balance_of(Party::Attacker),
        ) {
            (SettlementStatus::Complete, Some(target_balance), Some(attacker_balance)) => format!(
                "💰 {} robbed ${} from {}!\n{}'s new balance: ${}\n{}'s new balance: ${}",
                a,
                cash(amount),
                t,
                a,
                format_cash(attacker_balance),
                t,
                format_cash(target_balance)
            ),
            (SettlementStatus::Partial, Some(target_balance), None) => format!(
                "⚠️ {} lost ${} (new balance: ${}), but the payout to {} failed. \
                 An admin will need to sort it out.",
                t,
                cash(amount),
                format_cash(target_balance),
                a
            ),
            _ => "❌ Failed to rob the target. They might be broke or protected!".to_string(),
        },

        Outcome::Defended { penalty } => match settlement.balance_of(Party::Attacker) {
            Some(balance) => format!(
                "🩸 {} dropped ${} fleeing from {}.\n{}'s new balance: ${}",
                a,
                cash(penalty),
                t,
                a,
                format_cash(balance)
            ),
            None => format!(
                "❌ {} got away, but their ${} penalty couldn't be applied.",
                a,
                cash(penalty)
            ),
        },

        Outcome::Standoff { .. } => {
            let header = match status {
                SettlementStatus::Complete => "🏥 Hospital bills are in:",
                SettlementStatus::Partial => "⚠️ Only some of the hospital bills went through:",
                _ => "❌ The hospital bills couldn't be charged:",
            };
            let mut lines = vec![header.to_string()];
            lines.extend(settlement.legs.iter().map(|leg| penalty_line(scene, leg)));
            lines.join("\n")
        }

        Outcome::Evaded => format!("😮‍💨 {} walked away untouched. No money changed hands.", t),

        Outcome::Forbidden
        | Outcome::SelfTarget
        | Outcome::BotTarget
        | Outcome::NoValidTargets => "❌ The robbery never happened.".to_string(),
    }
}
