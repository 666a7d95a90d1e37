//! Integration tests for the timer engine.
//!
//! Sessions are driven second by second through `tick()` with no clock, and
//! the resulting event streams are checked against the phase rules.

use proptest::prelude::*;
use tabata_core::timer::plan;
use tabata_core::{CueKind, Event, Phase, SessionConfig, TimerEngine};

fn config(cycles: u32, sets: u32) -> SessionConfig {
    SessionConfig {
        prepare_secs: 3,
        work_secs: 6,
        rest_secs: 2,
        cycles,
        sets,
        rest_between_sets_secs: 4,
        cool_down_secs: 5,
        infinite_cycles: false,
    }
}

/// Run a session to completion, collecting every event including `start`'s.
fn run_session(cfg: SessionConfig) -> (TimerEngine, Vec<Event>) {
    let mut engine = TimerEngine::new();
    let mut events = engine.start(cfg).unwrap();
    while let Some(g) = engine.countdown_generation() {
        events.extend(engine.tick(g));
    }
    (engine, events)
}

fn entered(events: &[Event]) -> Vec<(Phase, u32, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::PhaseEntered {
                phase, cycle, set, ..
            } => Some((*phase, *cycle, *set)),
            _ => None,
        })
        .collect()
}

/// Beep counts per visited phase, in order.
fn beeps_per_phase(events: &[Event]) -> Vec<(Phase, usize)> {
    let mut out: Vec<(Phase, usize)> = Vec::new();
    for e in events {
        match e {
            Event::PhaseEntered { phase, .. } => out.push((*phase, 0)),
            Event::Cue {
                kind: CueKind::ShortBeep,
            } => {
                if let Some(last) = out.last_mut() {
                    last.1 += 1;
                }
            }
            _ => {}
        }
    }
    out
}

#[test]
fn three_cycles_two_sets_sequence() {
    let (engine, events) = run_session(config(3, 2));
    use Phase::*;
    assert_eq!(
        entered(&events),
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
        ]
    );
    assert_eq!(engine.phase(), Finished);
    assert_eq!(engine.seconds_remaining(), 0);
}

#[test]
fn engine_and_planner_agree() {
    let cfg = SessionConfig {
        prepare_secs: 0,
        rest_secs: 0,
        ..config(4, 3)
    };
    let (_, events) = run_session(cfg);
    let planned: Vec<(Phase, u32, u32)> = plan(&cfg)
        .unwrap()
        .into_iter()
        .filter(|p| p.phase != Phase::Finished)
        .map(|p| (p.phase, p.cycle, p.set))
        .collect();
    assert_eq!(entered(&events), planned);
}

#[test]
fn one_bell_per_phase_and_one_fanfare() {
    let (_, events) = run_session(config(3, 2));
    let cues: Vec<CueKind> = events.iter().filter_map(Event::cue).collect();
    let bells = cues
        .iter()
        .filter(|c| **c == CueKind::EndOfPhaseBell)
        .count();
    assert_eq!(bells, entered(&events).len());
    assert_eq!(cues.last(), Some(&CueKind::SessionCompleteFanfare));
    assert_eq!(
        cues.iter()
            .filter(|c| **c == CueKind::SessionCompleteFanfare)
            .count(),
        1
    );
}

#[test]
fn beeps_are_capped_at_five_per_phase() {
    let (_, events) = run_session(config(1, 1));
    assert_eq!(
        beeps_per_phase(&events),
        vec![(Phase::Prepare, 3), (Phase::Work, 5), (Phase::CoolDown, 5)]
    );
}

#[test]
fn status_text_follows_every_tick() {
    let (_, events) = run_session(config(2, 1));
    for (i, e) in events.iter().enumerate() {
        if matches!(e, Event::Tick { .. }) {
            let next = events[i + 1..]
                .iter()
                .find(|e| matches!(e, Event::StatusText { .. } | Event::Tick { .. }));
            assert!(
                matches!(next, Some(Event::StatusText { .. })),
                "tick at {i} not followed by a status update"
            );
        }
    }
    assert_eq!(
        events.iter().rev().find_map(|e| match e {
            Event::StatusText { text } => Some(text.as_str()),
            _ => None,
        }),
        Some("Session complete!")
    );
}

#[test]
fn infinite_session_never_finishes() {
    let cfg = SessionConfig {
        infinite_cycles: true,
        ..config(2, 2)
    };
    let mut engine = TimerEngine::new();
    engine.start(cfg).unwrap();
    // Far more seconds than a finite 2x2 session would take.
    for _ in 0..1_000 {
        let g = engine.countdown_generation().expect("still counting down");
        engine.tick(g);
        assert!(!matches!(engine.phase(), Phase::CoolDown | Phase::Finished));
    }
    assert!(engine.cycle_index() > cfg.cycles);
    assert_eq!(engine.set_index(), 1);

    engine.stop().unwrap();
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn pausing_mid_session_changes_nothing_but_the_pause() {
    let cfg = config(2, 2);
    let (_, uninterrupted) = run_session(cfg);

    let mut engine = TimerEngine::new();
    let mut events = engine.start(cfg).unwrap();
    let mut second = 0;
    while let Some(g) = engine.countdown_generation() {
        if second % 7 == 3 {
            engine.pause().unwrap();
            // Nothing counts while paused, whatever generation.
            assert!(engine.tick(g).is_empty());
            engine.resume().unwrap();
            continue_with(&mut engine, &mut events);
        } else {
            events.extend(engine.tick(g));
        }
        second += 1;
    }
    assert_eq!(events, uninterrupted);
}

/// One tick under whatever generation is current.
fn continue_with(engine: &mut TimerEngine, events: &mut Vec<Event>) {
    if let Some(g) = engine.countdown_generation() {
        events.extend(engine.tick(g));
    }
}

proptest! {
    #[test]
    fn start_then_stop_is_idle(
        prepare in 0u32..20, work in 0u32..20, rest in 0u32..20,
        cycles in 1u32..10, sets in 1u32..5, infinite in any::<bool>()
    ) {
        let cfg = SessionConfig {
            prepare_secs: prepare,
            work_secs: work.max(u32::from(infinite)),
            rest_secs: rest,
            cycles,
            sets,
            rest_between_sets_secs: 0,
            cool_down_secs: 0,
            infinite_cycles: infinite,
        };
        let mut engine = TimerEngine::new();
        engine.start(cfg).unwrap();
        engine.stop().unwrap();
        prop_assert_eq!(engine.phase(), Phase::Idle);
        prop_assert_eq!(engine.seconds_remaining(), 0);
    }

    #[test]
    fn beep_count_is_min_of_duration_and_five(work in 0u32..12, cycles in 1u32..4) {
        let cfg = SessionConfig {
            prepare_secs: 0,
            work_secs: work,
            rest_secs: 0,
            cycles,
            sets: 1,
            rest_between_sets_secs: 0,
            cool_down_secs: 0,
            infinite_cycles: false,
        };
        let (_, events) = run_session(cfg);
        let per_phase = beeps_per_phase(&events);
        if work == 0 {
            prop_assert!(per_phase.is_empty());
        } else {
            prop_assert_eq!(per_phase.len(), cycles as usize);
            for (_, beeps) in per_phase {
                prop_assert_eq!(beeps, work.min(5) as usize);
            }
        }
    }

    #[test]
    fn session_takes_exactly_its_total_duration(
        prepare in 0u32..8, work in 0u32..8, rest in 0u32..8,
        cycles in 1u32..5, sets in 1u32..4, between in 0u32..8, cool in 0u32..8
    ) {
        let cfg = SessionConfig {
            prepare_secs: prepare,
            work_secs: work,
            rest_secs: rest,
            cycles,
            sets,
            rest_between_sets_secs: between,
            cool_down_secs: cool,
            infinite_cycles: false,
        };
        let mut engine = TimerEngine::new();
        engine.start(cfg).unwrap();
        let mut seconds = 0u64;
        while let Some(g) = engine.countdown_generation() {
            engine.tick(g);
            seconds += 1;
        }
        prop_assert_eq!(engine.phase(), Phase::Finished);
        prop_assert_eq!(Some(seconds), cfg.total_duration_secs());
    }
}
