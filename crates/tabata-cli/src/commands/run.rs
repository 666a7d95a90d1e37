use std::io::Write;

use clap::Args;
use tabata_core::storage::CuesConfig;
use tabata_core::timer::Sound;
use tabata_core::{Config, CoreError, CueKind, Event, Phase, SessionConfig, SessionDriver, SessionHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use super::session_args::SessionArgs;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    session: SessionArgs,
    /// Print every event as a JSON line instead of the status line
    #[arg(long)]
    json: bool,
    /// Never ring the terminal bell
    #[arg(long)]
    quiet: bool,
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = args.session.resolve(config.session);
    session.validate()?;

    let mut cues = config.cues.clone();
    if args.quiet {
        cues.sound = false;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(session, Display::new(args.json, cues)))
}

async fn drive(session: SessionConfig, mut display: Display) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, driver) = SessionDriver::spawn();
    let mut events = handle.subscribe();
    handle.start(session).await?;
    if !display.json {
        eprintln!("Enter: pause/resume   p: pause   r: resume   q: stop");
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    display.render(&event)?;
                    if matches!(event, Event::SessionCompleted { .. } | Event::SessionEnded) {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!(missed, "display fell behind"),
                Err(RecvError::Closed) => break,
            },
            line = input.next_line(), if stdin_open => match line? {
                Some(line) => control(&handle, line.trim()).await,
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                report("stop", handle.stop().await);
            }
        }
    }

    handle.shutdown().await?;
    driver.await?;
    Ok(())
}

async fn control(handle: &SessionHandle, line: &str) {
    match line {
        "" => {
            if handle.snapshot().phase == Phase::Paused {
                report("resume", handle.resume().await);
            } else {
                report("pause", handle.pause().await);
            }
        }
        "p" | "pause" => report("pause", handle.pause().await),
        "r" | "resume" => report("resume", handle.resume().await),
        "q" | "s" | "stop" => report("stop", handle.stop().await),
        other => eprintln!("unknown command '{other}' (p = pause, r = resume, q = stop)"),
    }
}

fn report(operation: &str, result: Result<(), CoreError>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is_invalid_state() => eprintln!("\n{operation} ignored: {e}"),
        Err(e) => warn!(operation, error = %e, "command failed"),
    }
}

/// Terminal rendering of session events.
struct Display {
    json: bool,
    cues: CuesConfig,
    out: std::io::Stdout,
}

impl Display {
    fn new(json: bool, cues: CuesConfig) -> Self {
        Self {
            json,
            cues,
            out: std::io::stdout(),
        }
    }

    fn render(&mut self, event: &Event) -> std::io::Result<()> {
        if let Event::Cue { kind } = event {
            if !self.cues.wants(*kind) {
                return Ok(());
            }
        }
        let mut out = self.out.lock();
        if self.json {
            let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
            writeln!(out, "{line}")?;
            return out.flush();
        }

        match event {
            Event::StatusText { text } => write!(out, "\r\x1b[2K{text}")?,
            // Keep one finished line per phase on screen.
            Event::PhaseEntered { .. } | Event::Paused { .. } => writeln!(out)?,
            Event::Cue { kind } if self.cues.rings(*kind) => {
                write!(out, "{}", "\x07".repeat(bells(*kind)))?
            }
            Event::SessionEnded => writeln!(out, "\r\x1b[2KSession stopped.")?,
            Event::SessionCompleted { .. } => writeln!(out)?,
            _ => {}
        }
        out.flush()
    }
}

/// Terminal bells standing in for a cue: one per tone, one per vibration
/// pulse for bell sounds.
fn bells(kind: CueKind) -> usize {
    let rendering = kind.rendering();
    match rendering.sound {
        Sound::Tone { .. } => 1,
        Sound::Bell { .. } => {
            // Multi-entry waveforms alternate off/on, starting with off.
            let offset = usize::from(rendering.vibration_ms.len() > 1);
            rendering.vibration_ms.iter().skip(offset).step_by(2).count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fanfare_rings_twice() {
        assert_eq!(bells(CueKind::ShortBeep), 1);
        assert_eq!(bells(CueKind::EndOfPhaseBell), 1);
        assert_eq!(bells(CueKind::SessionCompleteFanfare), 2);
    }
}
