//! CLI argument definitions for modforge
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modforge")]
#[command(about = "Module variant data generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a generation pass (derive variants, write documents)
    #[command(visible_alias = "g")]
    Generate {
        /// Directory holding materials.toml and modules.toml
        #[arg(long)]
        data: Option<PathBuf>,

        /// Reference template namespace (modules/ and schemas/)
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Output root for generated documents
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Language code for the localization file name
        #[arg(long)]
        lang: Option<String>,

        /// Derive and report without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect the loaded catalog
    #[command(visible_alias = "k")]
    Catalog {
        /// Directory holding materials.toml and modules.toml
        #[arg(long)]
        data: Option<PathBuf>,

        /// List materials only
        #[arg(long)]
        materials: bool,

        /// List module families only
        #[arg(long)]
        modules: bool,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Set the default reference directory
        #[arg(long)]
        reference_dir: Option<PathBuf>,

        /// Set the default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set the default language code
        #[arg(long)]
        lang: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
