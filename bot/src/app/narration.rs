//! Narration sequencer
//!
//! `narrate` turns an outcome into a fixed script of (message, delay) pairs.
//! `Narrator` plays a script through a reply channel, pausing between lines.
//! What to say and how to pace it are kept apart so scripts can be tested
//! without real time passing.

use std::sync::Arc;
use std::time::Duration;

use crate::app::payout_config::MAX_NARRATION_LINES;
use crate::app::reply::Reply;
use crate::domain::entities::{CommandVariant, Outcome, Participant};
use crate::domain::ports::{InteractionResponder, Pacer};
use crate::error::DiscordError;

/// One narration message and the pause that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationLine {
    pub text: String,
    pub delay: Duration,
}

/// Who is on stage and how the scene is paced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub variant: CommandVariant,
    pub attacker: String,
    pub target: String,
    pub delay: Duration,
}

impl Scene {
    pub fn new(
        variant: CommandVariant,
        attacker: &Participant,
        target: &Participant,
        delay: Duration,
    ) -> Self {
        Self {
            variant,
            attacker: attacker.mention(),
            target: target.mention(),
            delay,
        }
    }

    fn weapon(&self) -> &'static str {
        match self.variant {
            CommandVariant::Gunpoint => "a gun",
            CommandVariant::Woozie => "a Woozie",
            CommandVariant::Plock => "a Glock",
        }
    }
}

/// Script for `outcome`. Rejections have no narration.
pub fn narrate(outcome: &Outcome, scene: &Scene) -> Vec<NarrationLine> {
    let a = &scene.attacker;
    let t = &scene.target;
    let w = scene.weapon();

    let texts: Vec<String> = match (scene.variant, outcome) {
        (_, o) if o.is_rejection() => Vec::new(),

        (CommandVariant::Plock, Outcome::Defended { .. }) => vec![
            format!("🔫 {} pulls {} on {}!", a, w, t),
            format!("👀 {} smirks and reaches into their jacket...", t),
            format!("🔥 It's an Uzi! {} sprays the whole block!", t),
            format!("🏃 {} barely escapes, dropping cash all over the street!", a),
        ],
        (CommandVariant::Plock, Outcome::Evaded) => vec![
            format!("🔫 {} pulls {} on {}!", a, w, t),
            format!("🪖 {} levels a Shotgun and stares them down...", t),
            format!("🚪 {} backs off slowly. Nobody loses a cent today.", a),
        ],
        (CommandVariant::Plock, Outcome::Standoff { .. }) => vec![
            format!("🔫 {} pulls {} on {}!", a, w, t),
            format!("🔫 {} pulls a Glock right back!", t),
            "💥 Shots fired on both sides!".to_string(),
            "🩹 Both of them limp away patching up their wounds.".to_string(),
        ],
        (CommandVariant::Plock, _) => vec![
            format!("🔫 {} pulls {} on {}!", a, w, t),
            format!("😰 {} doesn't want any trouble...", t),
            format!("💸 {} snatches the cash and runs!", a),
        ],

        (_, Outcome::Standoff { .. }) => vec![
            format!("🔫 {} corners {} with {}...", a, t, w),
            format!("😤 But {} is packing a Woozie too!", t),
            "💥 Both of them open fire at once!".to_string(),
            "🚑 The smoke clears. Nobody wins, and both of them get the hospital bill.".to_string(),
        ],
        (_, Outcome::Defended { .. }) => vec![
            format!("🔫 {} creeps up on {} with {}...", a, t, w),
            format!("🪖 {} spins around with a Shotgun already racked!", t),
            format!("💥 BOOM! {} takes the blast and runs for it!", a),
        ],
        (_, _) => vec![
            format!("🔫 {} sticks {} in {}'s face!", a, w, t),
            format!("😨 {} freezes and slowly raises their hands...", t),
            format!("💰 {} empties their pockets and vanishes into the night!", a),
        ],
    };

    texts
        .into_iter()
        .map(|text| NarrationLine {
            text,
            delay: scene.delay,
        })
        .collect()
}

/// Plays narration scripts one line at a time
pub struct Narrator<P: Pacer> {
    pacer: Arc<P>,
}

impl<P: Pacer> Narrator<P> {
    pub fn new(pacer: Arc<P>) -> Self {
        Self { pacer }
    }

    /// Send each line in order, waiting for a line's delay before sending the
    /// next one. Returns the number of lines sent.
    pub async fn play<R: InteractionResponder + ?Sized>(
        &self,
        lines: &[NarrationLine],
        reply: &mut Reply<'_, R>,
    ) -> Result<usize, DiscordError> {
        let lines = &lines[..lines.len().min(MAX_NARRATION_LINES)];

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.pacer.pause(lines[i - 1].delay).await;
            }
            reply.say(&line.text, false).await?;
        }

        Ok(lines.len())
    }
}
