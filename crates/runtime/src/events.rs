//! Broadcast event bus for presentation-side subscribers.

use tokio::sync::broadcast;

use combat_core::{GameState, RoundReport};

use crate::types::{EndReason, PlayerId};

/// Engine events published by session workers.
#[derive(Clone, Debug)]
pub enum EngineEvent {
    CombatStarted {
        player: PlayerId,
        enemy: String,
        dungeon: bool,
    },
    RoundResolved {
        player: PlayerId,
        report: Box<RoundReport>,
    },
    CombatEnded {
        player: PlayerId,
        reason: EndReason,
    },
    /// A reconciliation pass corrected drifted session state.
    StateCorrected {
        player: PlayerId,
        from: GameState,
        to: GameState,
    },
}

/// One broadcast channel shared by every session worker.
///
/// Delivery is best effort: a missing or lagging subscriber never affects
/// already-committed combat state.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn publish(&self, event: EngineEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers; normal when presentation is not attached.
            tracing::trace!(target: "runtime::events", "event dropped, no subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
