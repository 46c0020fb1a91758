//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "layerlint",
    version,
    about = "Validate layered CSS stylesheets",
    long_about = "Layerlint checks a directory of CSS files for balanced braces and comments, a required @layer declaration, and browser-grade parse errors.\n\nConfiguration precedence: CLI > layerlint.toml > defaults.",
    after_help = "Examples:\n  layerlint\n  layerlint check --src-dir styles --output json\n  layerlint scan\n  layerlint grammar -v"
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Clone, Default)]
/// Options shared by every validation command.
pub struct CommonArgs {
    #[arg(long, global = true, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, global = true, help = "Stylesheet directory relative to the repository root (default: src)")]
    pub src_dir: Option<String>,
    #[arg(long, global = true, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Pretty, help = "Log format on stderr")]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
/// Supported subcommands. `check` runs when none is given.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current layerlint version.")]
    Version,
    /// Run structural and grammar checks
    #[command(
        about = "Run all checks",
        long_about = "Run the structural scan and the grammar validation on every stylesheet. Any failure exits with status 1."
    )]
    Check,
    /// Structural scan only
    #[command(
        about = "Check braces, comments and @layer",
        long_about = "Count braces and comment delimiters and require an @layer declaration. No CSS parsing."
    )]
    Scan,
    /// Grammar validation only
    #[command(
        about = "Parse with lightningcss",
        long_about = "Parse every stylesheet for the configured browser targets and report parse errors and warnings."
    )]
    Grammar,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum LogFormatArg {
    #[default]
    Pretty,
    Compact,
    Json,
}
