mod cli;
mod error_fmt;
mod logging;
mod run;

use clap::Parser;
use cli::{Cli, JSON_MODE};
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    let _ = color_eyre::install();

    // Holds the file log writer open; dropped before exit so it flushes.
    let mut log_guard: Option<WorkerGuard> = None;
    let outcome = try_main(&cli, &mut log_guard);
    if let Err(err) = outcome {
        tracing::error!(error = %err, "run failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        drop(log_guard);
        std::process::exit(error_fmt::exit_code_for_error(&err));
    }
}

fn try_main(cli: &Cli, log_guard: &mut Option<WorkerGuard>) -> eyre::Result<()> {
    let cfg = run::resolve_config(cli)?;
    *log_guard = logging::init(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = ?cfg, "resolved configuration");
    run::run(cli, &cfg)
}
