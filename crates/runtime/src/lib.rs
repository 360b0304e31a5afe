//! Session orchestration for the combat engine.
//!
//! One independent tokio task per player identity, fed by a single command
//! queue: within a session, processing is strictly sequential, so at most one
//! resolution is ever in flight per player and the engine's multi-step
//! pipeline never interleaves. Sessions are mutually independent and run
//! fully in parallel.
//!
//! Modules by responsibility:
//! - [`service`] hosts the registry owning one worker per player
//! - [`handle`] is the cloneable per-session façade
//! - [`events`] broadcasts engine events to presentation-side subscribers
//! - [`worker`] keeps the session task internal to the crate
pub mod error;
pub mod events;
pub mod handle;
pub mod service;
pub mod types;

mod worker;

pub use error::{Result, RuntimeError};
pub use events::{EngineEvent, EventBus};
pub use handle::SessionHandle;
pub use service::CombatService;
pub use types::{ActionOutcome, EndReason, PlayerId};
