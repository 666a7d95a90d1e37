//! Human-readable status line for the notification surface.

use super::{EngineState, Phase};

/// `m:ss` once a minute or more remains, `s s` below that.
pub fn format_time(seconds: u32) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    if m > 0 {
        format!("{m}:{s:02}")
    } else {
        format!("{s} s")
    }
}

/// Status line describing `state`.
pub fn status_text(state: &EngineState) -> String {
    match state.phase {
        Phase::Idle => "Ready".to_string(),
        Phase::Paused => "Paused".to_string(),
        Phase::Finished => "Session complete!".to_string(),
        Phase::Work => format!(
            "{}: {}",
            work_label(state),
            format_time(state.seconds_remaining)
        ),
        phase => format!("{}: {}", phase.label(), format_time(state.seconds_remaining)),
    }
}

fn work_label(state: &EngineState) -> String {
    let Some(config) = state.config.as_ref() else {
        return Phase::Work.label().to_string();
    };
    let cycles = match config.total_cycles() {
        Some(total) => total.to_string(),
        None => "∞".to_string(),
    };
    if config.sets > 1 {
        format!(
            "Work {}/{cycles}, set {}/{}",
            state.cycle_index, state.set_index, config.sets
        )
    } else {
        format!("Work {}/{cycles}", state.cycle_index)
    }
}
