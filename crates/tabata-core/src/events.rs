use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{CueKind, Phase, SessionConfig};

/// Every state change in a session produces one or more Events.
/// The presentation layer and the status surface subscribe to them;
/// cue collaborators only care about [`Event::Cue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        config: SessionConfig,
    },
    /// A countdown phase with non-zero duration began.
    /// Skipped phases never produce this.
    PhaseEntered {
        phase: Phase,
        duration_secs: u32,
        cycle: u32,
        set: u32,
    },
    /// Published once when a phase is entered and once per elapsed second.
    Tick {
        phase: Phase,
        remaining_secs: u32,
    },
    Cue {
        kind: CueKind,
    },
    /// Replacement text for the persistent status surface.
    StatusText {
        text: String,
    },
    Paused {
        interrupted: Phase,
        remaining_secs: u32,
    },
    Resumed {
        phase: Phase,
        remaining_secs: u32,
    },
    /// Entered `Finished`.
    SessionCompleted {
        sets: u32,
    },
    /// The session is gone (stopped or acknowledged); clear the status surface.
    SessionEnded,
}

impl Event {
    pub fn cue(&self) -> Option<CueKind> {
        match self {
            Event::Cue { kind } => Some(*kind),
            _ => None,
        }
    }
}

/// Read-only view of the engine, published on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub cycle_index: u32,
    pub set_index: u32,
    /// `None` for infinite sessions and while idle.
    pub total_cycles: Option<u32>,
    /// `None` while idle.
    pub total_sets: Option<u32>,
    pub status: String,
    pub at: DateTime<Utc>,
}
