use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tsum_cli::commands::{export, layouts, load};
use tsum_cli::{Cli, Commands, Config, Failure, Session};

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut session = Session::new();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Load {
            input,
            layout,
            json,
        }) => {
            let layout = layout.unwrap_or(config.layout);
            load::run(&mut stdout, &mut session, layout, input, *json)?;
        }
        Some(Commands::Export {
            input,
            output,
            layout,
        }) => {
            let layout = layout.unwrap_or(config.layout);
            export::run(
                &mut stdout,
                &mut session,
                layout,
                input,
                output,
                &config.export_options(),
            )?;
        }
        Some(Commands::Layouts) => {
            layouts::run(&mut stdout, config.layout)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let failure = Failure::classify(&err);
            tracing::debug!(?failure, error = ?err, "command failed");
            eprintln!("{}", failure.render(&err));
            failure.exit_code()
        }
    }
}
