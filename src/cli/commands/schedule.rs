//! Schedule command - export an epsilon decay curve as CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::exploration::EpsilonSchedule;

#[derive(Parser, Debug)]
#[command(about = "Export an epsilon decay curve", allow_negative_numbers = true)]
pub struct ScheduleArgs {
    /// Decay law (const_power, exp_power, t_square_reciprocal, cos)
    #[arg(long, short = 'l', default_value = "const_power")]
    pub law: String,

    /// Decay constant
    #[arg(long, short = 'c', default_value_t = 0.99)]
    pub constant: f64,

    /// Number of trials to evaluate, starting at t = 1
    #[arg(long, short = 't', default_value_t = 300)]
    pub trials: u32,

    /// Output CSV file (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScheduleRow {
    trial: u32,
    epsilon: f64,
}

pub fn execute(args: ScheduleArgs) -> Result<()> {
    let schedule = EpsilonSchedule::parse(&args.law, args.constant)
        .context("invalid decay law configuration")?;

    let rows = (1..=args.trials).map(|t| ScheduleRow {
        trial: t,
        epsilon: schedule.epsilon_at(t),
    });

    match &args.output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            println!(
                "Wrote {} trials of {} (c={}) to {}",
                args.trials,
                schedule.law,
                schedule.constant,
                path.display()
            );
        }
        None => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
