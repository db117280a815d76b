//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up modforge CLI defaults.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;

pub struct ConfigureArgs {
    pub data_dir: Option<PathBuf>,
    pub reference_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub lang: Option<String>,
    pub show: bool,
}

/// Handle the configure command
pub fn handle(args: ConfigureArgs) -> Result<()> {
    let mut config = Config::load()?;

    if args.show {
        show_config(&config);
        return Ok(());
    }

    let mut changed = false;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
        changed = true;
    }
    if let Some(dir) = args.reference_dir {
        config.reference_dir = Some(dir);
        changed = true;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = Some(dir);
        changed = true;
    }
    if let Some(lang) = args.lang {
        config.lang = Some(lang);
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration updated");
        if let Ok(path) = Config::config_path() {
            println!("Config saved to: {}", path.display());
        }
    } else {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Data directory:      {}", config.data_dir(None).display());
    println!("Reference directory: {}", config.reference_dir(None).display());
    println!("Output directory:    {}", config.output_dir(None).display());
    println!("Language:            {}", config.lang(None));
    println!("Namespace:           {}", config.namespace());

    if let Ok(path) = Config::config_path() {
        println!("Config file:         {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: modforge configure --data-dir DIR --reference-dir DIR --output-dir DIR");
    println!("   or: modforge configure --show");
}
