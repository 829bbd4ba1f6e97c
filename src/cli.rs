use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(
    name = "lintent",
    version,
    about = "Lint runner that enriches violations with semantic meaning for LLMs",
    long_about = None
)]
pub struct Cli {
    /// Log level, written to stderr (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: LINTENT_LOG=] [default: warn]
    #[arg(
        long,
        env = "LINTENT_LOG",
        default_value = "warn",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run all linters and output an enriched report
    Run(RunArgs),
    /// Create a starter lintent.yaml
    Init(InitArgs),
    /// Validate lintent.yaml structure
    Validate(ConfigArgs),
    /// List all defined semantic rules
    List(ConfigArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to lintent.yaml [default: ./lintent.yaml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run only this linter (ruff, pyright, eslint, typescript)
    #[arg(short, long)]
    pub tool: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Preset to start from (python, typescript)
    #[arg(long, default_value = "python")]
    pub preset: String,

    /// Path to config file
    #[arg(long, default_value = "lintent.yaml")]
    pub config: PathBuf,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Arguments for commands that only read lintent.yaml
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to lintent.yaml [default: ./lintent.yaml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
