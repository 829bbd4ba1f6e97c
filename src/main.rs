mod cli;
mod command;
mod config;
mod detect;
mod enrich;
mod error;
mod parser;
mod preset;
mod report;
mod runner;
mod types;

use clap::Parser;
use cli::{Cli, Commands};
use command::Outcome;
use error::LintentError;
use tracing::error;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let pretty = match &cli.command {
        Commands::Run(args) => args.pretty,
        Commands::Init(args) => args.pretty,
        Commands::Validate(args) | Commands::List(args) => args.pretty,
    };

    let success = match dispatch(&cli.command).await {
        Ok(outcome) => {
            println!("{}", report::to_json(&outcome.body, pretty));
            outcome.success
        }
        Err(e) => {
            error!("{}", e);
            println!("{}", report::to_json(&e.to_report(), pretty));
            false
        }
    };

    if !success {
        std::process::exit(EXIT_FAILURE);
    }
}

async fn dispatch(cmd: &Commands) -> Result<Outcome, LintentError> {
    let cwd = std::env::current_dir().map_err(LintentError::WorkingDir)?;
    match cmd {
        Commands::Run(args) => command::run::run(args, &cwd).await,
        Commands::Init(args) => command::init::init(args, &cwd),
        Commands::Validate(args) => command::validate::validate(args, &cwd),
        Commands::List(args) => command::list::list(args, &cwd),
    }
}
