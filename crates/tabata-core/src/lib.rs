//! # Tabata Core Library
//!
//! Core logic for an interval-training ("Tabata") timer. A session runs
//! through a fixed sequence of phases (prepare, work, rest, rest between
//! sets, cool down) and emits cue and status events along the way.
//! The CLI and any GUI are thin hosts over this library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a clock-free state machine; the caller delivers
//!   elapsed seconds through `tick()`, tagged with a countdown generation
//! - **Phase machine**: pure transition functions, testable without timers
//! - **Session Driver**: a tokio task that owns the engine, runs the
//!   one-second ticker and publishes snapshots and events
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SessionDriver`]: Async host for the engine
//! - [`SessionConfig`]: Durations and counts of one session
//! - [`Config`]: Application configuration management

pub mod driver;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use driver::{SessionDriver, SessionHandle};
pub use error::{ConfigValidationError, CoreError, SettingsError};
pub use events::{Event, Snapshot};
pub use storage::Config;
pub use timer::{CueKind, EngineState, Phase, PlannedPhase, SessionConfig, TimerEngine};
