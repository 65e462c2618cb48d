//! Robbery Service
//!
//! Runs one command invocation end to end:
//! - Guild snapshot (Discord), deferring the interaction if it is slow
//! - Gate check, target selection, outcome resolution (pure)
//! - Narration (Discord, paced)
//! - Balance mutations (economy service)
//! - Result summary
//!
//! Every invocation ends with exactly one terminal message to the player,
//! whether it succeeds, is rejected, or fails. The invocation bound only
//! covers the stages before money moves; once the first mutation starts the
//! settlement runs to completion.

use std::sync::Arc;
use std::time::Duration;

use crate::app::balance_mutator::BalanceMutator;
use crate::app::narration::{narrate, Narrator, Scene};
use crate::app::outcome_engine::resolve;
use crate::app::payout_config::ACK_DEADLINE;
use crate::app::reply::Reply;
use crate::app::role_resolver::RoleResolver;
use crate::app::summary::render_summary;
use crate::app::target_selector::select_target;
use crate::domain::entities::{Invocation, Outcome, Settlement, TierRoleNames, UserId};
use crate::domain::ports::{Dice, EconomyClient, GuildDirectory, InteractionResponder, Pacer};
use crate::error::{RobberyError, GENERIC_FAILURE_MESSAGE};

/// Progress of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    GateChecked,
    TargetResolved,
    OutcomeComputed,
    Narrating,
    Mutating,
    Responded,
    Failed,
}

/// What an invocation did, for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    pub stage: Stage,
    /// Stage reached before failing, when `stage` is `Failed`
    pub failed_at: Option<Stage>,
    pub outcome: Option<Outcome>,
    pub settlement: Option<Settlement>,
}

impl InvocationReport {
    fn new() -> Self {
        Self {
            stage: Stage::Idle,
            failed_at: None,
            outcome: None,
            settlement: None,
        }
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "Invocation stage");
        self.stage = stage;
    }
}

/// A resolved and narrated encounter, ready to settle
struct Encounter {
    outcome: Outcome,
    scene: Scene,
    attacker: UserId,
    target: UserId,
}

/// Collaborators and settings behind the robbery commands
pub struct RobberyService<GD, EC, PC, DC>
where
    GD: GuildDirectory,
    EC: EconomyClient,
    PC: Pacer,
    DC: Dice,
{
    directory: Arc<GD>,
    mutator: BalanceMutator<EC>,
    narrator: Narrator<PC>,
    dice: Arc<DC>,
    tier_roles: TierRoleNames,
    narration_delay: Duration,
    ack_deadline: Duration,
    bound: Option<Duration>,
}

impl<GD, EC, PC, DC> RobberyService<GD, EC, PC, DC>
where
    GD: GuildDirectory,
    EC: EconomyClient,
    PC: Pacer,
    DC: Dice,
{
    pub fn new(
        directory: Arc<GD>,
        economy: Arc<EC>,
        pacer: Arc<PC>,
        dice: Arc<DC>,
        tier_roles: TierRoleNames,
        narration_delay: Duration,
    ) -> Self {
        Self {
            directory,
            mutator: BalanceMutator::new(economy),
            narrator: Narrator::new(pacer),
            dice,
            tier_roles,
            narration_delay,
            ack_deadline: ACK_DEADLINE,
            bound: None,
        }
    }

    /// Limit the stages before settlement to `bound`
    pub fn with_bound(mut self, bound: Duration) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Defer the interaction when the guild fetch takes longer than `deadline`
    pub fn with_ack_deadline(mut self, deadline: Duration) -> Self {
        self.ack_deadline = deadline;
        self
    }

    /// Run one invocation. Never fails: errors become the terminal message.
    pub async fn run<R: InteractionResponder + ?Sized>(
        &self,
        invocation: &Invocation,
        responder: &R,
    ) -> InvocationReport {
        let mut reply = Reply::new(responder);
        let mut report = InvocationReport::new();

        let prepared = {
            let prepare = self.prepare(invocation, &mut reply, &mut report);
            match self.bound {
                Some(limit) => tokio::time::timeout(limit, prepare)
                    .await
                    .unwrap_or_else(|_| Err(RobberyError::Timeout(limit))),
                None => prepare.await,
            }
        };

        let result = match prepared {
            Ok(encounter) => {
                self.finish(invocation, encounter, &mut reply, &mut report)
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => report.advance(Stage::Responded),
            Err(err) => {
                if err.is_rejection() {
                    tracing::info!(
                        guild_id = %invocation.guild_id,
                        caller = %invocation.caller_id,
                        command = %invocation.command,
                        reason = %err,
                        "Robbery rejected"
                    );
                } else {
                    tracing::error!(
                        guild_id = %invocation.guild_id,
                        caller = %invocation.caller_id,
                        command = %invocation.command,
                        stage = ?report.stage,
                        acknowledged = reply.acknowledged(),
                        error = %err,
                        "Robbery failed"
                    );
                }

                if report.outcome.is_none() {
                    report.outcome = rejection_outcome(&err);
                }

                if let Err(send_err) = reply.say(&err.user_message(), true).await {
                    tracing::error!(
                        guild_id = %invocation.guild_id,
                        caller = %invocation.caller_id,
                        error = %send_err,
                        "Failed to deliver failure message"
                    );
                }

                report.failed_at = Some(report.stage);
                report.advance(Stage::Failed);
            }
        }

        report
    }

    /// Everything up to the first balance change. Safe to cancel.
    async fn prepare<R: InteractionResponder + ?Sized>(
        &self,
        invocation: &Invocation,
        reply: &mut Reply<'_, R>,
        report: &mut InvocationReport,
    ) -> Result<Encounter, RobberyError> {
        let snapshot = {
            let mut fetch = self.directory.snapshot(invocation.guild_id);
            let early = tokio::time::timeout(self.ack_deadline, &mut fetch).await;
            match early {
                Ok(snapshot) => snapshot?,
                Err(_) => {
                    tracing::debug!(
                        guild_id = %invocation.guild_id,
                        caller = %invocation.caller_id,
                        "Guild fetch is slow, deferring interaction"
                    );
                    reply.acknowledge().await?;
                    fetch.await?
                }
            }
        };

        let resolver = RoleResolver::new(&self.tier_roles, invocation.command, &snapshot.role_names)?;
        let caller = snapshot
            .member(invocation.caller_id)
            .ok_or(RobberyError::UnknownMember(invocation.caller_id))?;

        if !resolver.holds_gate(caller) {
            return Err(RobberyError::Forbidden(resolver.gate_role().to_string()));
        }
        report.advance(Stage::GateChecked);

        let explicit_target = match invocation.target_id {
            Some(id) => Some(
                snapshot
                    .member(id)
                    .ok_or(RobberyError::UnknownMember(id))?,
            ),
            None => None,
        };
        let target = {
            let mut rng = rand::thread_rng();
            select_target(caller, explicit_target, &snapshot.members, &mut rng)?
        };
        report.advance(Stage::TargetResolved);

        let outcome = resolve(
            resolver.attacker_tier(caller),
            resolver.resolve_tier(&target),
            invocation.command,
            self.dice.as_ref(),
        );
        if outcome.is_rejection() {
            return Err(RobberyError::Forbidden(resolver.gate_role().to_string()));
        }
        report.outcome = Some(outcome);
        report.advance(Stage::OutcomeComputed);

        tracing::info!(
            guild_id = %invocation.guild_id,
            caller = %caller.id,
            target = %target.id,
            target_name = %target.display_name,
            command = %invocation.command,
            outcome = outcome.kind(),
            "Outcome resolved"
        );

        let scene = Scene::new(invocation.command, caller, &target, self.narration_delay);
        report.advance(Stage::Narrating);
        let lines = narrate(&outcome, &scene);
        self.narrator.play(&lines, reply).await?;

        Ok(Encounter {
            outcome,
            scene,
            attacker: caller.id,
            target: target.id,
        })
    }

    /// Settle balances and send the summary. Runs unbounded.
    async fn finish<R: InteractionResponder + ?Sized>(
        &self,
        invocation: &Invocation,
        encounter: Encounter,
        reply: &mut Reply<'_, R>,
        report: &mut InvocationReport,
    ) -> Result<(), RobberyError> {
        report.advance(Stage::Mutating);
        let settlement = self
            .mutator
            .settle(
                invocation.guild_id,
                &encounter.outcome,
                encounter.attacker,
                encounter.target,
            )
            .await;
        let summary = render_summary(&encounter.outcome, &settlement, &encounter.scene);
        report.settlement = Some(settlement);

        reply.say(&summary, false).await?;
        Ok(())
    }
}

impl<GD, EC, PC, DC> RobberyService<GD, EC, PC, DC>
where
    GD: GuildDirectory + 'static,
    EC: EconomyClient + 'static,
    PC: Pacer + 'static,
    DC: Dice + 'static,
{
    /// Run an invocation on its own task.
    ///
    /// A panic inside the invocation still produces the generic failure
    /// message.
    pub async fn run_supervised<R: InteractionResponder + 'static>(
        self: Arc<Self>,
        invocation: Invocation,
        responder: Arc<R>,
    ) -> Result<InvocationReport, RobberyError> {
        let worker = {
            let responder = responder.clone();
            tokio::spawn(async move { self.run(&invocation, responder.as_ref()).await })
        };

        let err = match worker.await {
            Ok(report) => return Ok(report),
            Err(join_err) => RobberyError::Aborted(join_err.to_string()),
        };

        tracing::error!(
            guild_id = %invocation.guild_id,
            caller = %invocation.caller_id,
            command = %invocation.command,
            error = %err,
            "Robbery invocation did not finish"
        );

        // The worker may or may not have acknowledged the interaction
        if responder.follow_up(GENERIC_FAILURE_MESSAGE).await.is_err() {
            if let Err(send_err) = responder.respond(GENERIC_FAILURE_MESSAGE, true).await {
                tracing::error!(error = %send_err, "Failed to deliver failure message");
            }
        }

        Err(err)
    }
}

fn rejection_outcome(err: &RobberyError) -> Option<Outcome> {
    match err {
        RobberyError::Forbidden(_) => Some(Outcome::Forbidden),
        RobberyError::SelfTarget => Some(Outcome::SelfTarget),
        RobberyError::BotTarget => Some(Outcome::BotTarget),
        RobberyError::NoValidTargets => Some(Outcome::NoValidTargets),
        _ => None,
    }
}
