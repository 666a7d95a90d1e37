//! Timer engine implementation.
//!
//! The engine owns the single session's [`EngineState`] and applies the pure
//! transitions from [`machine`](super::machine). It does not use internal
//! threads or clocks - the caller delivers elapsed seconds through `tick()`,
//! tagged with the countdown generation they were scheduled under.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Prepare -> Work <-> Rest ... -> CoolDown -> Finished -> Idle
//!          (any countdown phase) <-> Paused
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start(SessionConfig::default())?;
//! // Once per second, while `countdown_generation()` is Some(g):
//! let events = engine.tick(g);
//! ```

use chrono::Utc;
use tracing::{debug, info, trace};

use super::machine::{self, EngineState, Transition};
use super::status::status_text;
use super::{Phase, SessionConfig};
use crate::error::{CoreError, Result};
use crate::events::{Event, Snapshot};

/// Core timer engine.
///
/// Every command either applies completely and returns the events it produced,
/// or returns [`CoreError`] and leaves the state exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    state: EngineState,
    /// Bumped whenever the countdown is started, restarted or cancelled.
    /// Ticks carrying an older value belong to a cancelled countdown.
    generation: u64,
}

impl TimerEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    pub fn cycle_index(&self) -> u32 {
        self.state.cycle_index
    }

    pub fn set_index(&self) -> u32 {
        self.state.set_index
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.state.config.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation a one-second ticker should currently run under, or `None`
    /// when nothing is counting down (idle, paused, finished).
    pub fn countdown_generation(&self) -> Option<u64> {
        self.state.phase.is_countdown().then_some(self.generation)
    }

    pub fn status_text(&self) -> String {
        status_text(&self.state)
    }

    /// Build a full state snapshot.
    pub fn snapshot(&self) -> Snapshot {
        let config = self.state.config.as_ref();
        Snapshot {
            phase: self.state.phase,
            seconds_remaining: self.state.seconds_remaining,
            cycle_index: self.state.cycle_index,
            set_index: self.state.set_index,
            total_cycles: config.and_then(SessionConfig::total_cycles),
            total_sets: config.map(|c| c.sets),
            status: self.status_text(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. A finished session is cleared first.
    ///
    /// # Errors
    ///
    /// `InvalidState` while another session is active, `InvalidConfig` when
    /// `config` breaks its invariants. Neither touches the current state.
    pub fn start(&mut self, config: SessionConfig) -> Result<Vec<Event>> {
        match self.state.phase {
            Phase::Idle | Phase::Finished => {}
            phase => {
                return Err(CoreError::InvalidState {
                    operation: "start",
                    phase,
                })
            }
        }
        config.validate()?;

        info!(
            work = config.work_secs,
            rest = config.rest_secs,
            cycles = config.cycles,
            sets = config.sets,
            infinite = config.infinite_cycles,
            "starting session"
        );
        self.generation += 1;
        Ok(self.apply(machine::begin(config)))
    }

    /// Freeze the countdown of the current phase.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless a countdown phase is running.
    pub fn pause(&mut self) -> Result<Vec<Event>> {
        let phase = self.state.phase;
        if !phase.is_countdown() {
            return Err(CoreError::InvalidState {
                operation: "pause",
                phase,
            });
        }

        self.generation += 1;
        self.state.saved_phase = Some(phase);
        self.state.phase = Phase::Paused;
        debug!(interrupted = %phase, remaining = self.state.seconds_remaining, "paused");
        Ok(vec![
            Event::Paused {
                interrupted: phase,
                remaining_secs: self.state.seconds_remaining,
            },
            Event::StatusText {
                text: self.status_text(),
            },
        ])
    }

    /// Continue the paused phase from exactly the frozen second.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless paused.
    pub fn resume(&mut self) -> Result<Vec<Event>> {
        let (Phase::Paused, Some(saved)) = (self.state.phase, self.state.saved_phase) else {
            return Err(CoreError::InvalidState {
                operation: "resume",
                phase: self.state.phase,
            });
        };

        self.generation += 1;
        self.state.phase = saved;
        self.state.saved_phase = None;
        debug!(phase = %saved, remaining = self.state.seconds_remaining, "resumed");
        Ok(vec![
            Event::Resumed {
                phase: saved,
                remaining_secs: self.state.seconds_remaining,
            },
            Event::StatusText {
                text: self.status_text(),
            },
        ])
    }

    /// Discard the session. Stopping an idle engine does nothing.
    pub fn stop(&mut self) -> Result<Vec<Event>> {
        if self.state.phase == Phase::Idle {
            return Ok(Vec::new());
        }
        info!(phase = %self.state.phase, "stopping session");
        Ok(self.clear())
    }

    /// Leave the `Finished` screen.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the session has finished.
    pub fn acknowledge(&mut self) -> Result<Vec<Event>> {
        if self.state.phase != Phase::Finished {
            return Err(CoreError::InvalidState {
                operation: "acknowledge",
                phase: self.state.phase,
            });
        }
        Ok(self.clear())
    }

    /// One elapsed second from the ticker running under `generation`.
    ///
    /// Ticks from a cancelled countdown are dropped.
    pub fn tick(&mut self, generation: u64) -> Vec<Event> {
        if self.countdown_generation() != Some(generation) {
            trace!(
                generation,
                current = self.generation,
                phase = %self.state.phase,
                "dropping stale tick"
            );
            return Vec::new();
        }

        let before = self.state.phase;
        let events = self.apply(machine::elapse(self.state.clone()));
        if self.state.phase != before {
            debug!(
                from = %before,
                to = %self.state.phase,
                cycle = self.state.cycle_index,
                set = self.state.set_index,
                "phase changed"
            );
        }
        if self.state.phase == Phase::Finished {
            info!("session complete");
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, transition: Transition) -> Vec<Event> {
        self.state = transition.state;
        transition.events
    }

    fn clear(&mut self) -> Vec<Event> {
        self.generation += 1;
        self.state = EngineState::default();
        vec![Event::SessionEnded]
    }
}
