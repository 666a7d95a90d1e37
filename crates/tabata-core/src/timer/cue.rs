use serde::{Deserialize, Serialize};

/// Audio/haptic signal requested by the engine.
///
/// The engine only names the cue; whoever owns the speaker and the vibrator
/// decides how to render it. [`CueKind::rendering`] gives the suggested
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    /// Countdown beep on each of the last five seconds of a phase.
    ShortBeep,
    /// A countdown phase ran out.
    EndOfPhaseBell,
    /// The whole session is over.
    SessionCompleteFanfare,
}

/// Suggested concrete rendering of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueRendering {
    pub sound: Sound,
    /// Vibration waveform in milliseconds, alternating off/on when it has
    /// more than one entry.
    pub vibration_ms: &'static [u64],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Plain tone of the given length.
    Tone { millis: u64 },
    /// Bell sample, with a tone fallback when no sample is available.
    Bell { fallback_tone_millis: u64 },
}

const BEEP_VIBRATION: &[u64] = &[100];
const BELL_VIBRATION: &[u64] = &[500];
const FANFARE_VIBRATION: &[u64] = &[0, 800, 200, 800];

impl CueKind {
    pub fn rendering(self) -> CueRendering {
        match self {
            CueKind::ShortBeep => CueRendering {
                sound: Sound::Tone { millis: 150 },
                vibration_ms: BEEP_VIBRATION,
            },
            CueKind::EndOfPhaseBell => CueRendering {
                sound: Sound::Bell {
                    fallback_tone_millis: 500,
                },
                vibration_ms: BELL_VIBRATION,
            },
            CueKind::SessionCompleteFanfare => CueRendering {
                sound: Sound::Bell {
                    fallback_tone_millis: 500,
                },
                vibration_ms: FANFARE_VIBRATION,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fanfare_vibrates_twice() {
        let r = CueKind::SessionCompleteFanfare.rendering();
        assert_eq!(r.vibration_ms, &[0, 800, 200, 800]);
    }

    #[test]
    fn beep_is_a_short_tone() {
        let r = CueKind::ShortBeep.rendering();
        assert_eq!(r.sound, Sound::Tone { millis: 150 });
        assert_eq!(r.vibration_ms, &[100]);
    }
}
