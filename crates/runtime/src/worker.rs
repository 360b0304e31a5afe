//! Per-player session worker.
//!
//! The worker owns the authoritative player record, game state, and (while
//! fighting) the enemy snapshot. Commands arrive over a single queue and are
//! handled to completion one at a time, which is what guarantees at most one
//! in-flight resolution per player. The taming oracle is consulted before
//! the engine is entered, so the resolution critical section never suspends.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use combat_core::stats::ResourceMeter;
use combat_core::{
    CombatAction, Combatant, EnemySnapshot, EngineConfig, EngineError, Env, GameState, PcgRng,
    PlayerCommand, PlayerStateData, ResolveContext, RoundOutcome, RoundReport, StatCatalog,
    TameOutcome, TamingOracle, resolve_round, resolve_tame,
};

use crate::error::{Result, RuntimeError};
use crate::events::{EngineEvent, EventBus};
use crate::types::{ActionOutcome, EndReason, PlayerId};

/// Commands a [`crate::handle::SessionHandle`] can send to its worker.
pub(crate) enum Command {
    StartCombat {
        enemy: Box<EnemySnapshot>,
        reply: oneshot::Sender<Result<()>>,
    },
    Submit {
        command: PlayerCommand,
        reply: oneshot::Sender<Result<ActionOutcome>>,
    },
    CurrentState {
        reply: oneshot::Sender<GameState>,
    },
    PlayerSnapshot {
        reply: oneshot::Sender<Box<Combatant>>,
    },
    EndCombat {
        reason: EndReason,
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

pub(crate) struct SessionWorker {
    player_id: PlayerId,
    player: Combatant,
    state: PlayerStateData,
    enemy: Option<EnemySnapshot>,
    config: EngineConfig,
    catalog: Arc<dyn StatCatalog>,
    taming: Arc<dyn TamingOracle>,
    rng: PcgRng,
    session_seed: u64,
    nonce: u64,
    command_rx: mpsc::Receiver<Command>,
    events: EventBus,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        player_id: PlayerId,
        player: Combatant,
        config: EngineConfig,
        catalog: Arc<dyn StatCatalog>,
        taming: Arc<dyn TamingOracle>,
        session_seed: u64,
        command_rx: mpsc::Receiver<Command>,
        events: EventBus,
    ) -> Self {
        Self {
            player_id,
            player,
            state: PlayerStateData::new(unix_now()),
            enemy: None,
            config,
            catalog,
            taming,
            rng: PcgRng,
            session_seed,
            nonce: 0,
            command_rx,
            events,
        }
    }

    pub(crate) async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::StartCombat { enemy, reply } => {
                    let _ = reply.send(self.start_combat(*enemy));
                }
                Command::Submit { command, reply } => {
                    let _ = reply.send(self.submit(command));
                }
                Command::CurrentState { reply } => {
                    let _ = reply.send(self.state.current);
                }
                Command::PlayerSnapshot { reply } => {
                    let _ = reply.send(Box::new(self.player.clone()));
                }
                Command::EndCombat { reason, reply } => {
                    self.end_combat(reason);
                    let _ = reply.send(());
                }
                Command::Shutdown => break,
            }
        }
        debug!(target: "runtime::worker", player = %self.player_id, "session worker stopped");
    }

    fn start_combat(&mut self, enemy: EnemySnapshot) -> Result<()> {
        if self.enemy.is_some() {
            return Err(RuntimeError::CombatAlreadyActive(self.player_id));
        }

        let state = if enemy.dungeon {
            GameState::InDungeonCombat
        } else {
            GameState::InCombat
        };
        self.state
            .transition_to(state, Some(enemy.combatant.name.clone()), unix_now());

        info!(
            target: "runtime::worker",
            player = %self.player_id,
            enemy = %enemy.combatant.name,
            dungeon = enemy.dungeon,
            "combat started"
        );
        self.events.publish(EngineEvent::CombatStarted {
            player: self.player_id,
            enemy: enemy.combatant.name.clone(),
            dungeon: enemy.dungeon,
        });
        self.enemy = Some(enemy);
        Ok(())
    }

    /// The single entry point for player-initiated commands.
    fn submit(&mut self, command: PlayerCommand) -> Result<ActionOutcome> {
        self.sync_state();

        if !self.state.current.allows(&command) {
            debug!(
                target: "runtime::worker",
                player = %self.player_id,
                state = %self.state.current,
                %command,
                "command rejected by guard"
            );
            return Err(EngineError::ActionNotAllowed {
                state: self.state.current,
                command,
            }
            .into());
        }

        match command {
            PlayerCommand::Combat(action) => self.combat_round(action),
            PlayerCommand::Tame => self.tame(),
            other => Ok(ActionOutcome::Transitioned(self.menu_transition(other))),
        }
    }

    /// Reconcile state against the combat session before any guard runs.
    /// The session data wins; the machine reports what it corrected.
    fn sync_state(&mut self) {
        let in_dungeon = self.enemy.as_ref().map_or(
            matches!(
                self.state.current,
                GameState::InDungeon | GameState::InDungeonCombat
            ),
            |enemy| enemy.dungeon,
        );
        if let Some(correction) = self.state.sync(self.enemy.is_some(), in_dungeon, unix_now()) {
            warn!(
                target: "runtime::worker",
                player = %self.player_id,
                from = %correction.from,
                to = %correction.to,
                "state resynchronized against combat session"
            );
            self.events.publish(EngineEvent::StateCorrected {
                player: self.player_id,
                from: correction.from,
                to: correction.to,
            });
        }
    }

    fn combat_round(&mut self, action: CombatAction) -> Result<ActionOutcome> {
        let Some(enemy) = self.enemy.as_mut() else {
            return Err(EngineError::NotInCombat.into());
        };

        let mut ctx = ResolveContext::new(
            &self.config,
            Env::new(self.catalog.as_ref(), &self.rng),
            self.session_seed,
            self.nonce,
        );
        let report = resolve_round(&mut self.player, enemy, action, &mut ctx)?;
        self.nonce = ctx.nonce();
        self.finish_round(report)
    }

    fn tame(&mut self) -> Result<ActionOutcome> {
        let Some(enemy) = self.enemy.as_mut() else {
            return Err(EngineError::NotInCombat.into());
        };

        // The oracle is consulted here, outside the engine, so the
        // resolution itself only ever sees the finished outcome.
        let outcome = if enemy.tameable {
            self.taming.attempt(&self.player, &enemy.combatant)
        } else {
            TameOutcome::Resisted
        };

        let mut ctx = ResolveContext::new(
            &self.config,
            Env::new(self.catalog.as_ref(), &self.rng),
            self.session_seed,
            self.nonce,
        );
        let report = resolve_tame(&mut self.player, enemy, outcome, &mut ctx)?;
        self.nonce = ctx.nonce();
        self.finish_round(report)
    }

    /// Publish the resolved round and run the transition its outcome calls
    /// for. The report is already committed; nothing after this point can
    /// roll it back.
    fn finish_round(&mut self, report: RoundReport) -> Result<ActionOutcome> {
        self.events.publish(EngineEvent::RoundResolved {
            player: self.player_id,
            report: Box::new(report.clone()),
        });

        match &report.outcome {
            RoundOutcome::Ongoing => {}
            RoundOutcome::Victory { .. } => self.close_combat(EndReason::Victory),
            RoundOutcome::Defeat => {
                self.revive();
                self.close_combat(EndReason::Defeat);
            }
            RoundOutcome::Fled => self.close_combat(EndReason::Fled),
            RoundOutcome::Tamed { .. } => self.close_combat(EndReason::Tamed),
        }

        Ok(ActionOutcome::Round(Box::new(report)))
    }

    /// Soft defeat: no death screen, no zeroed record. The player comes
    /// back at half strength and the session leaves combat.
    fn revive(&mut self) {
        let max = self.player.hp.maximum;
        self.player.hp = ResourceMeter::new((max / 2).max(1), max);
        info!(
            target: "runtime::worker",
            player = %self.player_id,
            hp = self.player.hp.current,
            "player revived at half health"
        );
    }

    fn end_combat(&mut self, reason: EndReason) {
        // Nothing to end; an explicit call outside combat is a no-op.
        if self.enemy.is_none() && !self.state.current.is_in_combat() {
            return;
        }
        self.close_combat(reason);
    }

    fn close_combat(&mut self, reason: EndReason) {
        self.enemy = None;
        self.player.leave_combat();

        match reason {
            // Defeat and taming pull the player all the way out, even mid
            // dungeon; these are forced jumps worth flagging in the logs.
            EndReason::Defeat | EndReason::Tamed => {
                let previous = self.state.force(GameState::Idle, unix_now());
                warn!(
                    target: "runtime::worker",
                    player = %self.player_id,
                    from = %previous,
                    %reason,
                    "state forced to idle"
                );
            }
            _ => {
                let next = if self.state.current == GameState::InDungeonCombat {
                    GameState::InDungeon
                } else {
                    GameState::Idle
                };
                self.state.transition_to(next, None, unix_now());
            }
        }

        info!(
            target: "runtime::worker",
            player = %self.player_id,
            %reason,
            state = %self.state.current,
            "combat ended"
        );
        self.events.publish(EngineEvent::CombatEnded {
            player: self.player_id,
            reason,
        });
    }

    fn menu_transition(&mut self, command: PlayerCommand) -> GameState {
        let next = match command {
            PlayerCommand::Explore => Some(GameState::Exploring),
            PlayerCommand::EnterDungeon => Some(GameState::InDungeon),
            PlayerCommand::LeaveDungeon | PlayerCommand::Return => Some(GameState::Idle),
            PlayerCommand::Rest => Some(GameState::Resting),
            PlayerCommand::CraftMenu => Some(GameState::Crafting),
            PlayerCommand::ShopMenu => Some(GameState::Shopping),
            PlayerCommand::TravelMenu => Some(GameState::TravelMenu),
            PlayerCommand::PetMenu => Some(GameState::PetManagement),
            PlayerCommand::SkillsMenu => Some(GameState::SkillsMenu),
            PlayerCommand::ClassMenu => Some(GameState::ClassMenu),
            // Advancing a dungeon floor and one-shot commands keep the
            // current state; encounters arrive through start_combat.
            PlayerCommand::DungeonAdvance
            | PlayerCommand::Work
            | PlayerCommand::QuestMenu
            | PlayerCommand::Status => None,
            // Dispatched before this point.
            PlayerCommand::Combat(_) | PlayerCommand::Tame => None,
        };

        if let Some(state) = next {
            self.state.transition_to(state, None, unix_now());
            debug!(
                target: "runtime::worker",
                player = %self.player_id,
                state = %state,
                "menu transition"
            );
        }
        self.state.current
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
