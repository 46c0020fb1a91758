//! Layerlint CLI binary entry point.
//! Resolves config, runs the selected checks and prints the report.

use clap::Parser;
use layerlint::cli::{Cli, Commands, CommonArgs, LogFormatArg};
use layerlint::config;
use layerlint::grammar::LightningEngine;
use layerlint::lint::{self, Checks, LintOptions};
use layerlint::logging::{init_logging, LogConfig, LogFormat};
use layerlint::models::RunStatus;
use layerlint::output;
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.common.verbose)
        .with_format(match cli.common.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_ansi(io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {e}");
        std::process::exit(2);
    }

    let checks = match cli.cmd.unwrap_or(Commands::Check) {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Commands::Check => Checks::ALL,
        Commands::Scan => Checks::STRUCTURAL,
        Commands::Grammar => Checks::GRAMMAR,
    };

    match run(&cli.common, checks) {
        Ok(RunStatus::Ok) => {}
        Ok(RunStatus::Fail) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}

/// Resolve settings, validate and print. Setup errors abort before any
/// file is checked.
fn run(args: &CommonArgs, checks: Checks) -> layerlint::Result<RunStatus> {
    let eff = config::resolve_effective(
        args.repo_root.as_deref(),
        args.src_dir.as_deref(),
        args.output.as_deref(),
    )?;
    if !eff.config_found {
        tracing::info!(root = %eff.repo_root.display(), "no layerlint.toml found; using defaults");
    }

    let engine = LightningEngine::new(&eff.grammar)?;
    let options = LintOptions {
        extension: eff.extension,
        layer_marker: eff.layer_marker,
        checks,
    };
    let report = lint::run_lint(&eff.src_dir, &options, &engine)?;
    output::print_report(&report, &eff.output);
    Ok(report.status())
}
