//! Pure phase-transition functions.
//!
//! Nothing in here touches a clock. Each function takes the current
//! [`EngineState`] by value and returns the next one together with the events
//! the change produces, so the transition table can be exercised second by
//! second without a scheduler.
//!
//! ## Transition table
//!
//! ```text
//! Prepare         -> Work
//! Work            -> Rest             (infinite, or cycle < cycles)
//! Work            -> RestBetweenSets  (last cycle, set < sets; cycle = 1, set += 1)
//! Work            -> CoolDown         (last cycle of the last set)
//! Rest            -> Work             (cycle += 1)
//! RestBetweenSets -> Work
//! CoolDown        -> Finished
//! ```

use serde::{Deserialize, Serialize};

use super::status::status_text;
use super::{CueKind, Phase, SessionConfig};
use crate::events::Event;

/// Countdown beeps sound while this many seconds or fewer remain.
pub const BEEP_WINDOW_SECS: u32 = 5;

/// The mutable session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub phase: Phase,
    pub seconds_remaining: u32,
    /// Current cycle within the current set, starting at 1.
    pub cycle_index: u32,
    /// Current set, starting at 1.
    pub set_index: u32,
    /// Active configuration; `None` while idle.
    pub config: Option<SessionConfig>,
    /// Phase to restore on resume; only set while paused.
    pub saved_phase: Option<Phase>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            seconds_remaining: 0,
            cycle_index: 1,
            set_index: 1,
            config: None,
            saved_phase: None,
        }
    }
}

/// New state plus the events produced on the way there.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: EngineState,
    pub events: Vec<Event>,
}

/// Target of a completed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub phase: Phase,
    pub cycle_index: u32,
    pub set_index: u32,
}

/// Where a completed `phase` leads. `None` for phases without a successor
/// (`Idle`, `Paused`, `Finished`).
pub fn successor(
    phase: Phase,
    cycle_index: u32,
    set_index: u32,
    config: &SessionConfig,
) -> Option<Advance> {
    let to = |phase, cycle_index, set_index| Advance {
        phase,
        cycle_index,
        set_index,
    };
    match phase {
        Phase::Prepare => Some(to(Phase::Work, cycle_index, set_index)),
        Phase::Work if config.infinite_cycles || cycle_index < config.cycles => {
            Some(to(Phase::Rest, cycle_index, set_index))
        }
        Phase::Work if set_index < config.sets => {
            Some(to(Phase::RestBetweenSets, 1, set_index + 1))
        }
        Phase::Work => Some(to(Phase::CoolDown, cycle_index, set_index)),
        Phase::Rest => Some(to(Phase::Work, cycle_index + 1, set_index)),
        Phase::RestBetweenSets => Some(to(Phase::Work, cycle_index, set_index)),
        Phase::CoolDown => Some(to(Phase::Finished, cycle_index, set_index)),
        Phase::Idle | Phase::Paused | Phase::Finished => None,
    }
}

/// Fresh session state for `config`, entered into `Prepare`.
///
/// The config must already be validated.
pub fn begin(config: SessionConfig) -> Transition {
    let state = EngineState {
        config: Some(config),
        ..EngineState::default()
    };
    let mut events = vec![Event::SessionStarted { config }];
    let state = enter_into(state, Phase::Prepare, &mut events);
    Transition { state, events }
}

/// One second of countdown.
///
/// Outside a countdown phase this is the identity.
pub fn elapse(mut state: EngineState) -> Transition {
    let mut events = Vec::new();
    let Some(config) = state.config else {
        return Transition { state, events };
    };
    if !state.phase.is_countdown() {
        return Transition { state, events };
    }

    state.seconds_remaining = state.seconds_remaining.saturating_sub(1);
    publish(&state, &mut events);

    if state.seconds_remaining == 0 {
        events.push(Event::Cue {
            kind: CueKind::EndOfPhaseBell,
        });
        if let Some(next) = successor(state.phase, state.cycle_index, state.set_index, &config) {
            state.cycle_index = next.cycle_index;
            state.set_index = next.set_index;
            state = enter_into(state, next.phase, &mut events);
        }
    }
    Transition { state, events }
}

fn enter_into(mut state: EngineState, mut phase: Phase, events: &mut Vec<Event>) -> EngineState {
    let Some(config) = state.config else {
        return state;
    };
    // An unvalidated infinite config could skip phases forever.
    if config.validate().is_err() {
        return state;
    }

    loop {
        if phase == Phase::Finished {
            state.phase = Phase::Finished;
            state.seconds_remaining = 0;
            state.saved_phase = None;
            events.push(Event::Cue {
                kind: CueKind::SessionCompleteFanfare,
            });
            events.push(Event::StatusText {
                text: status_text(&state),
            });
            events.push(Event::SessionCompleted { sets: config.sets });
            return state;
        }

        let duration = config.duration_of(phase);
        if duration > 0 {
            state.phase = phase;
            state.seconds_remaining = duration;
            events.push(Event::PhaseEntered {
                phase,
                duration_secs: duration,
                cycle: state.cycle_index,
                set: state.set_index,
            });
            publish(&state, events);
            return state;
        }

        match successor(phase, state.cycle_index, state.set_index, &config) {
            Some(next) => {
                state.cycle_index = next.cycle_index;
                state.set_index = next.set_index;
                phase = next.phase;
            }
            None => return state,
        }
    }
}

/// Tick, beep when inside the window, refresh the status line.
fn publish(state: &EngineState, events: &mut Vec<Event>) {
    events.push(Event::Tick {
        phase: state.phase,
        remaining_secs: state.seconds_remaining,
    });
    if (1..=BEEP_WINDOW_SECS).contains(&state.seconds_remaining) {
        events.push(Event::Cue {
            kind: CueKind::ShortBeep,
        });
    }
    events.push(Event::StatusText {
        text: status_text(state),
    });
}
