use clap::Args;
use serde::Serialize;
use tabata_core::timer::{format_time, plan, Phases};
use tabata_core::{Config, PlannedPhase};

use super::session_args::SessionArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    session: SessionArgs,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
    /// How many phases to list for infinite sessions
    #[arg(long, default_value = "12")]
    limit: usize,
}

#[derive(Serialize)]
struct PlanOutput {
    phases: Vec<PlannedPhase>,
    /// `None` when cycles repeat forever.
    total_secs: Option<u64>,
}

pub fn run(args: PlanArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = args.session.resolve(config.session);
    session.validate()?;

    let phases = if session.infinite_cycles {
        Phases::new(session).take(args.limit).collect()
    } else {
        plan(&session)?
    };
    let output = PlanOutput {
        phases,
        total_secs: session.total_duration_secs(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (i, p) in output.phases.iter().enumerate() {
        let duration = if p.duration_secs > 0 {
            format_time(p.duration_secs)
        } else {
            String::new()
        };
        println!(
            "{:>3}. {:<18} {:>6}   cycle {} / set {}",
            i + 1,
            p.phase.label(),
            duration,
            p.cycle,
            p.set
        );
    }
    match output.total_secs {
        Some(total) => {
            let total = u32::try_from(total)
                .map(format_time)
                .unwrap_or_else(|_| format!("{total} s"));
            println!("Total: {total}");
        }
        None => println!("Total: unbounded (infinite cycles, first {} phases shown)", args.limit),
    }
    Ok(())
}
