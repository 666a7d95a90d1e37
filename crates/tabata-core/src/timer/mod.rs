mod config;
mod cue;
mod engine;
pub mod machine;
mod phase;
pub mod plan;
pub mod status;

pub use config::SessionConfig;
pub use cue::{CueKind, CueRendering, Sound};
pub use engine::TimerEngine;
pub use machine::{EngineState, Transition};
pub use phase::Phase;
pub use plan::{plan, PlannedPhase, Phases};
pub use status::{format_time, status_text};
