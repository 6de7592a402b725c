use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use smoke_test::{register_flashcard_steps, run_script, RunError, RunSummary, Site, StepRegistry};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "smoke-test")]
#[command(about = "Post-deployment smoke tests for a flashcards site")]
struct Args {
    /// Base URL of the site, no trailing slash
    #[arg(short = 'u', long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Test script (feature file) to run
    script: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<RunSummary, RunError> {
    let site = Rc::new(Site::new(&args.base_url)?);
    info!(base_url = %site.base_url(), script = %args.script.display(), "starting run");
    let mut registry = StepRegistry::new();
    register_flashcard_steps(&mut registry, site);

    let script = BufReader::new(File::open(&args.script)?);
    let stdout = io::stdout();
    run_script(script, &registry, &mut stdout.lock())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    println!("Post-deployment Flashcard Tests");

    match run(&args) {
        Ok(summary) if summary.success() => ExitCode::SUCCESS,
        Ok(summary) => {
            info!(failed = summary.scenarios_failed, "scenarios failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "smoke test run aborted");
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
