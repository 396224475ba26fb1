use anyhow::Context;
use clap::Parser;
use forkscan::cli::{Cli, Commands, ScanCommand};
use forkscan::output;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = cli.app_settings().context("loading settings")?;

    match &cli.command {
        Some(Commands::Scan(cmd)) => cmd.execute(&app, cli.verbose, cli.quiet).await?,
        Some(Commands::Report(cmd)) => cmd.execute(cli.quiet)?,
        Some(Commands::Status(cmd)) => cmd.execute()?,
        None => {
            // Everything comes from the environment, as in a bare `.env` setup.
            let cmd = ScanCommand::try_parse_from([env!("CARGO_PKG_NAME")])?;
            cmd.execute(&app, cli.verbose, cli.quiet).await?
        }
    }

    Ok(())
}

/// Log to stderr so stdout only carries results. `RUST_LOG` wins over flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "forkscan=debug"
    } else if quiet {
        "forkscan=warn"
    } else {
        "forkscan=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
