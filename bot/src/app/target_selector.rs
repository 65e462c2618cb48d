//! Target selector
//!
//! Validates an explicit target or draws a random eligible member.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::Participant;
use crate::error::RobberyError;

/// Resolve who gets robbed.
///
/// With no explicit target, picks uniformly among members that are neither
/// bots nor the caller.
pub fn select_target<R: Rng + ?Sized>(
    caller: &Participant,
    explicit_target: Option<&Participant>,
    members: &[Participant],
    rng: &mut R,
) -> Result<Participant, RobberyError> {
    if let Some(target) = explicit_target {
        if target.id == caller.id {
            return Err(RobberyError::SelfTarget);
        }
        if target.is_bot {
            return Err(RobberyError::BotTarget);
        }
        return Ok(target.clone());
    }

    let eligible: Vec<&Participant> = members
        .iter()
        .filter(|m| !m.is_bot && m.id != caller.id)
        .collect();

    eligible
        .choose(rng)
        .map(|m| (*m).clone())
        .ok_or(RobberyError::NoValidTargets)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::entities::UserId;
    use crate::test_utils::{test_bot, test_member};

    #[test]
    fn explicit_self_target_rejected() {
        let caller = test_member(1);
        let err = select_target(&caller, Some(&caller), &[], &mut rand::thread_rng()).unwrap_err();
        assert!(matches!(err, RobberyError::SelfTarget));
    }

    #[test]
    fn explicit_bot_target_rejected() {
        let caller = test_member(1);
        let bot = test_bot(99);
        let err = select_target(&caller, Some(&bot), &[], &mut rand::thread_rng()).unwrap_err();
        assert!(matches!(err, RobberyError::BotTarget));
    }

    #[test]
    fn explicit_target_returned_as_is() {
        let caller = test_member(1);
        let target = test_member(2).with_role("Shotgun");
        let chosen =
            select_target(&caller, Some(&target), &[], &mut rand::thread_rng()).unwrap();
        assert_eq!(chosen, target);
    }

    #[test]
    fn no_eligible_members() {
        let caller = test_member(1);
        let members = vec![caller.clone(), test_bot(2), test_bot(3)];
        let err = select_target(&caller, None, &members, &mut rand::thread_rng()).unwrap_err();
        assert!(matches!(err, RobberyError::NoValidTargets));
    }

    #[test]
    fn random_target_excludes_caller_and_bots_and_covers_eligible_set() {
        let caller = test_member(1);
        let members = vec![
            caller.clone(),
            test_member(2),
            test_bot(3),
            test_member(4),
            test_member(5),
            test_bot(6),
            test_member(7),
        ];

        let trials = 4_000;
        let mut counts: HashMap<UserId, usize> = HashMap::new();
        let mut rng = rand::thread_rng();
        for _ in 0..trials {
            let target = select_target(&caller, None, &members, &mut rng).unwrap();
            assert_ne!(target.id, caller.id);
            assert!(!target.is_bot);
            *counts.entry(target.id).or_default() += 1;
        }

        // Four eligible members, each expected ~1000 times
        assert_eq!(counts.len(), 4);
        for (id, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "member {} chosen {} times",
                id,
                count
            );
        }
    }
}
