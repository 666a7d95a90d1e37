use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of stages a session moves through.
///
/// `Paused` is a meta-state: the interrupted phase is kept alongside it in
/// [`EngineState::saved_phase`](super::EngineState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Prepare,
    Work,
    Rest,
    RestBetweenSets,
    CoolDown,
    Finished,
    Paused,
}

impl Phase {
    /// Phases that run a countdown and can be paused.
    pub fn is_countdown(self) -> bool {
        matches!(
            self,
            Phase::Prepare | Phase::Work | Phase::Rest | Phase::RestBetweenSets | Phase::CoolDown
        )
    }

    /// Human-readable name, as shown on the status surface.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Prepare => "Prepare",
            Phase::Work => "Work",
            Phase::Rest => "Rest",
            Phase::RestBetweenSets => "Rest between sets",
            Phase::CoolDown => "Cool down",
            Phase::Finished => "Finished",
            Phase::Paused => "Paused",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}
