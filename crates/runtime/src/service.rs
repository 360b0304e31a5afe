//! Session registry.
//!
//! [`CombatService`] owns one worker task per connected player and the
//! event bus they publish to. The oracles are shared by every session; the
//! per-session seed makes each player's roll stream independent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use combat_core::{Combatant, EnemySnapshot, EngineConfig, GameState, PlayerCommand, StatCatalog, TamingOracle};

use crate::error::{Result, RuntimeError};
use crate::events::{EngineEvent, EventBus};
use crate::handle::SessionHandle;
use crate::types::{ActionOutcome, EndReason, PlayerId};
use crate::worker::SessionWorker;

const COMMAND_QUEUE_DEPTH: usize = 32;

struct Session {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

pub struct CombatService {
    config: EngineConfig,
    catalog: Arc<dyn StatCatalog>,
    taming: Arc<dyn TamingOracle>,
    events: EventBus,
    sessions: Mutex<HashMap<PlayerId, Session>>,
}

impl CombatService {
    pub fn new(
        config: EngineConfig,
        catalog: Arc<dyn StatCatalog>,
        taming: Arc<dyn TamingOracle>,
    ) -> Self {
        Self {
            config,
            catalog,
            taming,
            events: EventBus::new(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to engine events from every session.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Register a player and spawn their session worker.
    ///
    /// The combatant is the loaded player record; the caller reads it back
    /// with [`SessionHandle::player_snapshot`] when it wants to persist.
    pub fn connect(&self, player_id: PlayerId, player: Combatant) -> Result<SessionHandle> {
        let mut sessions = self.sessions.lock().expect("session table poisoned");
        if sessions.contains_key(&player_id) {
            return Err(RuntimeError::SessionExists(player_id));
        }

        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let worker = SessionWorker::new(
            player_id,
            player,
            self.config.clone(),
            Arc::clone(&self.catalog),
            Arc::clone(&self.taming),
            rand::random(),
            command_rx,
            self.events.clone(),
        );
        let task = tokio::spawn(worker.run());
        let handle = SessionHandle::new(player_id, command_tx);

        sessions.insert(
            player_id,
            Session {
                handle: handle.clone(),
                task,
            },
        );
        info!(target: "runtime::registry", player = %player_id, "session connected");
        Ok(handle)
    }

    /// Handle for an already-connected player.
    pub fn session(&self, player_id: PlayerId) -> Result<SessionHandle> {
        self.sessions
            .lock()
            .expect("session table poisoned")
            .get(&player_id)
            .map(|session| session.handle.clone())
            .ok_or(RuntimeError::NoActiveSession(player_id))
    }

    /// Begin an encounter for the player, handed in by the exploration or
    /// dungeon collaborators.
    pub async fn start_combat(
        &self,
        player_id: PlayerId,
        enemy: EnemySnapshot,
    ) -> Result<SessionHandle> {
        let handle = self.session(player_id)?;
        handle.start_combat(enemy).await?;
        Ok(handle)
    }

    /// Single entry point for player-initiated commands.
    pub async fn submit_action(
        &self,
        player_id: PlayerId,
        command: PlayerCommand,
    ) -> Result<ActionOutcome> {
        self.session(player_id)?.submit(command).await
    }

    /// Read-only state query, used by presentation to build menus.
    pub async fn current_state(&self, player_id: PlayerId) -> Result<GameState> {
        self.session(player_id)?.current_state().await
    }

    /// End any active combat for the player.
    pub async fn end_combat(&self, player_id: PlayerId, reason: EndReason) -> Result<()> {
        self.session(player_id)?.end_combat(reason).await
    }

    /// Tear the session down, ending combat deterministically first.
    pub async fn disconnect(&self, player_id: PlayerId) -> Result<Combatant> {
        let session = self
            .sessions
            .lock()
            .expect("session table poisoned")
            .remove(&player_id)
            .ok_or(RuntimeError::NoActiveSession(player_id))?;

        session.handle.end_combat(EndReason::Disconnect).await?;
        let record = session.handle.player_snapshot().await?;
        session.handle.shutdown().await?;
        session.task.await.map_err(RuntimeError::WorkerJoin)?;

        info!(target: "runtime::registry", player = %player_id, "session disconnected");
        Ok(record)
    }
}
