use serde::{Deserialize, Serialize};

use super::machine::successor;
use super::{Phase, SessionConfig};
use crate::error::ConfigValidationError;

/// One visible phase of a session, in the order it will run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPhase {
    pub phase: Phase,
    pub duration_secs: u32,
    pub cycle: u32,
    pub set: u32,
}

/// Iterator over the phases a session visits, zero-duration phases left out.
///
/// Ends after `Finished`; never ends for infinite sessions, so callers of an
/// infinite config must bound it themselves (e.g. with `take`).
pub struct Phases {
    config: SessionConfig,
    next: Option<(Phase, u32, u32)>,
}

impl Phases {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            next: Some((Phase::Prepare, 1, 1)),
        }
    }
}

impl Iterator for Phases {
    type Item = PlannedPhase;

    fn next(&mut self) -> Option<PlannedPhase> {
        loop {
            let (phase, cycle, set) = self.next?;
            if phase == Phase::Finished {
                self.next = None;
                return Some(PlannedPhase {
                    phase,
                    duration_secs: 0,
                    cycle,
                    set,
                });
            }

            self.next = successor(phase, cycle, set, &self.config)
                .map(|a| (a.phase, a.cycle_index, a.set_index));

            let duration_secs = self.config.duration_of(phase);
            if duration_secs > 0 {
                return Some(PlannedPhase {
                    phase,
                    duration_secs,
                    cycle,
                    set,
                });
            }
        }
    }
}

/// Full phase plan for a finite session, ending with `Finished`.
///
/// # Errors
///
/// Returns an error for invalid configs and for infinite sessions.
pub fn plan(config: &SessionConfig) -> Result<Vec<PlannedPhase>, ConfigValidationError> {
    config.validate()?;
    if config.infinite_cycles {
        return Err(ConfigValidationError::Unbounded);
    }
    Ok(Phases::new(*config).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SessionConfig {
        SessionConfig {
            prepare_secs: 10,
            work_secs: 20,
            rest_secs: 10,
            cycles: 3,
            sets: 2,
            rest_between_sets_secs: 60,
            cool_down_secs: 30,
            infinite_cycles: false,
        }
    }

    #[test]
    fn three_cycles_two_sets() {
        let steps: Vec<(Phase, u32, u32)> = plan(&cfg())
            .unwrap()
            .into_iter()
            .map(|p| (p.phase, p.cycle, p.set))
            .collect();
        use Phase::*;
        assert_eq!(
            steps,
            vec![
                (Prepare, 1, 1),
                (Work, 1, 1),
                (Rest, 1, 1),
                (Work, 2, 1),
                (Rest, 2, 1),
                (Work, 3, 1),
                (RestBetweenSets, 1, 2),
                (Work, 1, 2),
                (Rest, 1, 2),
                (Work, 2, 2),
                (Rest, 2, 2),
                (Work, 3, 2),
                (CoolDown, 3, 2),
                (Finished, 3, 2),
            ]
        );
    }

    #[test]
    fn plan_durations_add_up() {
        let config = cfg();
        let total: u64 = plan(&config)
            .unwrap()
            .iter()
            .map(|p| u64::from(p.duration_secs))
            .sum();
        assert_eq!(Some(total), config.total_duration_secs());
    }

    #[test]
    fn zero_phases_are_left_out() {
        let config = SessionConfig {
            prepare_secs: 0,
            rest_between_sets_secs: 0,
            cool_down_secs: 0,
            ..cfg()
        };
        let phases: Vec<Phase> = plan(&config).unwrap().iter().map(|p| p.phase).collect();
        assert_eq!(phases.first(), Some(&Phase::Work));
        assert!(!phases.contains(&Phase::Prepare));
        assert!(!phases.contains(&Phase::RestBetweenSets));
        assert!(!phases.contains(&Phase::CoolDown));
        assert_eq!(phases.last(), Some(&Phase::Finished));
    }

    #[test]
    fn infinite_sessions_cannot_be_planned() {
        let config = SessionConfig {
            infinite_cycles: true,
            ..cfg()
        };
        assert_eq!(plan(&config), Err(ConfigValidationError::Unbounded));
    }

    #[test]
    fn infinite_iterator_never_finishes() {
        let config = SessionConfig {
            infinite_cycles: true,
            ..cfg()
        };
        let phases: Vec<PlannedPhase> = Phases::new(config).take(1_000).collect();
        assert_eq!(phases.len(), 1_000);
        assert!(phases
            .iter()
            .all(|p| !matches!(p.phase, Phase::CoolDown | Phase::Finished)));
        assert!(phases.last().unwrap().cycle > config.cycles);
    }
}
