use serde::{Deserialize, Serialize};

use super::Phase;
use crate::error::ConfigValidationError;

/// Durations and repetition counts for one session.
///
/// Built by the presentation layer, validated by [`SessionConfig::validate`]
/// and never mutated while a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_prepare")]
    pub prepare_secs: u32,
    #[serde(default = "default_work")]
    pub work_secs: u32,
    #[serde(default = "default_rest")]
    pub rest_secs: u32,
    /// Work/rest repetitions per set. Ignored when `infinite_cycles` is set.
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    #[serde(default = "default_sets")]
    pub sets: u32,
    #[serde(default)]
    pub rest_between_sets_secs: u32,
    #[serde(default)]
    pub cool_down_secs: u32,
    #[serde(default)]
    pub infinite_cycles: bool,
}

fn default_prepare() -> u32 {
    10
}
fn default_work() -> u32 {
    20
}
fn default_rest() -> u32 {
    10
}
fn default_cycles() -> u32 {
    8
}
fn default_sets() -> u32 {
    1
}

impl Default for SessionConfig {
    /// The classic Tabata: 8 rounds of 20 s work / 10 s rest.
    fn default() -> Self {
        Self {
            prepare_secs: default_prepare(),
            work_secs: default_work(),
            rest_secs: default_rest(),
            cycles: default_cycles(),
            sets: default_sets(),
            rest_between_sets_secs: 0,
            cool_down_secs: 0,
            infinite_cycles: false,
        }
    }
}

impl SessionConfig {
    /// Check the invariants a session relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.cycles == 0 {
            return Err(ConfigValidationError::ZeroCycles(self.cycles));
        }
        if self.sets == 0 {
            return Err(ConfigValidationError::ZeroSets(self.sets));
        }
        if self.infinite_cycles && self.work_secs == 0 && self.rest_secs == 0 {
            return Err(ConfigValidationError::EmptyInfiniteCycle);
        }
        Ok(())
    }

    /// Configured seconds for `phase`; zero for phases without a countdown.
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Prepare => self.prepare_secs,
            Phase::Work => self.work_secs,
            Phase::Rest => self.rest_secs,
            Phase::RestBetweenSets => self.rest_between_sets_secs,
            Phase::CoolDown => self.cool_down_secs,
            Phase::Idle | Phase::Finished | Phase::Paused => 0,
        }
    }

    /// Total cycles for display, `None` when cycles repeat forever.
    pub fn total_cycles(&self) -> Option<u32> {
        (!self.infinite_cycles).then_some(self.cycles)
    }

    /// Length of the whole session in seconds, `None` for infinite sessions.
    ///
    /// Saturates at `u64::MAX` for absurdly long sessions.
    pub fn total_duration_secs(&self) -> Option<u64> {
        if self.infinite_cycles {
            return None;
        }
        let cycles = u64::from(self.cycles);
        let sets = u64::from(self.sets);
        let per_set = cycles
            .saturating_mul(u64::from(self.work_secs))
            .saturating_add(cycles.saturating_sub(1).saturating_mul(u64::from(self.rest_secs)));
        Some(
            u64::from(self.prepare_secs)
                .saturating_add(sets.saturating_mul(per_set))
                .saturating_add(sets.saturating_sub(1).saturating_mul(u64::from(self.rest_between_sets_secs)))
                .saturating_add(u64::from(self.cool_down_secs)),
        )
    }
}
