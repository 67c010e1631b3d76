//! Inspect command - summarize a saved agent file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    q_learning::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved agent")]
pub struct InspectArgs {
    /// Path to the saved agent (MessagePack)
    pub path: PathBuf,

    /// Emit the summary as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InspectSummary {
    version: u32,
    learning: bool,
    epsilon: f64,
    alpha: f64,
    trial: u32,
    decay_law: String,
    decay_constant: f64,
    table_states: usize,
    training_trials: usize,
    testing_trials: usize,
    test_success_rate: f64,
    note: Option<String>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let saved = SavedAgent::load_from_file(&args.path)?;
    let (learning, epsilon, alpha, trial, decay_law, decay_constant) = saved.hyperparameters();

    let summary = InspectSummary {
        version: saved.version,
        learning,
        epsilon,
        alpha,
        trial,
        decay_law: decay_law.to_string(),
        decay_constant,
        table_states: saved.table_states(),
        training_trials: saved.metadata.training_trials,
        testing_trials: saved.metadata.testing_trials,
        test_success_rate: saved.metadata.test_success_rate,
        note: saved.metadata.note.clone(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!("Agent: {}", args.path.display()));
    print_kv("format version", &summary.version.to_string());
    print_kv("learning", &summary.learning.to_string());
    print_kv("epsilon", &format!("{:.6}", summary.epsilon));
    print_kv("alpha", &format!("{:.6}", summary.alpha));
    print_kv("trial counter", &summary.trial.to_string());
    print_kv(
        "decay",
        &format!("{} (c={})", summary.decay_law, summary.decay_constant),
    );
    print_kv("table states", &format_number(summary.table_states));
    print_kv(
        "training trials",
        &format_number(summary.training_trials),
    );
    print_kv("testing trials", &format_number(summary.testing_trials));
    print_kv(
        "test success rate",
        &format!("{:.1}%", summary.test_success_rate * 100.0),
    );
    if let Some(note) = &summary.note {
        print_kv("note", note);
    }

    Ok(())
}
