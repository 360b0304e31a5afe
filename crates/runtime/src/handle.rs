//! Cloneable per-session façade.
//!
//! A [`SessionHandle`] hides the channel plumbing between callers and the
//! session worker: every operation is a command plus a oneshot reply, so
//! calls from any number of presentation tasks serialize onto the worker's
//! queue.

use tokio::sync::{mpsc, oneshot};

use combat_core::{Combatant, EnemySnapshot, GameState, PlayerCommand};

use crate::error::{Result, RuntimeError};
use crate::types::{ActionOutcome, EndReason, PlayerId};
use crate::worker::Command;

#[derive(Clone)]
pub struct SessionHandle {
    player_id: PlayerId,
    command_tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub(crate) fn new(player_id: PlayerId, command_tx: mpsc::Sender<Command>) -> Self {
        Self {
            player_id,
            command_tx,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Begin an encounter with the given snapshot.
    pub async fn start_combat(&self, enemy: EnemySnapshot) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::StartCombat {
            enemy: Box::new(enemy),
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Submit one player command, combat or menu.
    pub async fn submit(&self, command: PlayerCommand) -> Result<ActionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Submit {
            command,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Read the session's current game state.
    pub async fn current_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::CurrentState { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Clone of the authoritative player record, for persistence.
    pub async fn player_snapshot(&self) -> Result<Combatant> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::PlayerSnapshot { reply: reply_tx })
            .await?;
        reply_rx
            .await
            .map(|boxed| *boxed)
            .map_err(RuntimeError::ReplyChannelClosed)
    }

    /// End any active combat. A no-op when the session is not fighting.
    pub async fn end_combat(&self, reason: EndReason) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::EndCombat {
            reason,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
