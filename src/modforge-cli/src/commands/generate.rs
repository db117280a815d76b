//! Generation command handler
//!
//! Drives a full run: load the catalog, derive every variant against the
//! reference templates, and hand the collected documents to the writer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use modforge::{Aggregator, Catalog, OutputWriter, TemplateStore};

use crate::config::Config;

pub struct GenerateArgs {
    pub data: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub lang: Option<String>,
    pub dry_run: bool,
}

/// Handle the generate command
pub fn handle(args: GenerateArgs) -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir(args.data);
    let reference_dir = config.reference_dir(args.reference);
    let output_dir = config.output_dir(args.output);
    let lang = config.lang(args.lang);
    let namespace = config.namespace();

    let catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;
    println!(
        "Loaded catalog: {} materials, {} module families",
        catalog.materials.len(),
        catalog.modules.len()
    );

    let store = TemplateStore::new(&reference_dir);
    let data = Aggregator::new(namespace.as_str()).run(&catalog, &store);
    println!(
        "Derived {} variants across {} module documents ({} schemas)",
        data.variant_count(),
        data.modules.len(),
        data.schemas.len()
    );

    if args.dry_run {
        for module in &data.modules {
            let variants = module.document["variants"]
                .as_object()
                .map(serde_json::Map::len)
                .unwrap_or(0);
            println!("  {} - {} variants", module.module, variants);
        }
        println!("Dry run, nothing written");
        return Ok(());
    }

    let report = OutputWriter::new(&output_dir, namespace.as_str(), lang.as_str()).write_all(&data);
    println!(
        "Wrote {} files to {} ({} unchanged, {} failed)",
        report.written,
        output_dir.display(),
        report.skipped,
        report.failed
    );

    Ok(())
}
