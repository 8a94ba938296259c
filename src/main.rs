use dotenvy::dotenv;
use log::{error, warn};
use std::process::ExitCode;

use pow_benchmark::{BenchConfig, BenchmarkRunner, Error};

fn main() -> ExitCode {
    let _ = dotenv();
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Cancelled) => {
            warn!("interrupted; the unfinished unit is mined again on the next run");
            ExitCode::from(130)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> pow_benchmark::Result<()> {
    let config = BenchConfig::from_env()?;
    println!(
        "⛏️ Benchmarking PoW up to difficulty {} ({} trial(s) each, {} worker(s))",
        config.max_difficulty, config.trials_per_difficulty, config.workers
    );

    let mut runner = BenchmarkRunner::new(config)?;

    // Ctrl-C stops the search in flight; finished units are already on disk
    let token = runner.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
        warn!("Ctrl-C handler not installed: {e}");
    }

    let summary = runner.run()?;

    println!(
        "Mined {} block(s), chain height {}. Results saved to {}",
        summary.units_mined,
        summary.chain_height,
        runner.config().results_path.display()
    );
    Ok(())
}
