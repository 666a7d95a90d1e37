use clap::Args;
use tabata_core::SessionConfig;

/// Per-run overrides of the configured session preset.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Prepare duration in seconds
    #[arg(long)]
    pub prepare: Option<u32>,
    /// Work duration in seconds
    #[arg(long)]
    pub work: Option<u32>,
    /// Rest duration in seconds
    #[arg(long)]
    pub rest: Option<u32>,
    /// Work/rest cycles per set
    #[arg(long)]
    pub cycles: Option<u32>,
    /// Number of sets
    #[arg(long)]
    pub sets: Option<u32>,
    /// Rest between sets in seconds
    #[arg(long)]
    pub rest_between_sets: Option<u32>,
    /// Cool-down duration in seconds
    #[arg(long)]
    pub cool_down: Option<u32>,
    /// Repeat work/rest until stopped
    #[arg(long)]
    pub infinite: bool,
}

impl SessionArgs {
    pub fn resolve(&self, preset: SessionConfig) -> SessionConfig {
        SessionConfig {
            prepare_secs: self.prepare.unwrap_or(preset.prepare_secs),
            work_secs: self.work.unwrap_or(preset.work_secs),
            rest_secs: self.rest.unwrap_or(preset.rest_secs),
            cycles: self.cycles.unwrap_or(preset.cycles),
            sets: self.sets.unwrap_or(preset.sets),
            rest_between_sets_secs: self
                .rest_between_sets
                .unwrap_or(preset.rest_between_sets_secs),
            cool_down_secs: self.cool_down.unwrap_or(preset.cool_down_secs),
            infinite_cycles: self.infinite || preset.infinite_cycles,
        }
    }
}
