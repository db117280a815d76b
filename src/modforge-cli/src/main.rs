mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            data,
            reference,
            output,
            lang,
            dry_run,
        } => {
            commands::generate::handle(commands::generate::GenerateArgs {
                data,
                reference,
                output,
                lang,
                dry_run,
            })?;
        }

        Commands::Catalog {
            data,
            materials,
            modules,
        } => {
            commands::catalog::handle(data, materials, modules)?;
        }

        Commands::Configure {
            data_dir,
            reference_dir,
            output_dir,
            lang,
            show,
        } => {
            commands::configure::handle(commands::configure::ConfigureArgs {
                data_dir,
                reference_dir,
                output_dir,
                lang,
                show,
            })?;
        }
    }

    Ok(())
}
