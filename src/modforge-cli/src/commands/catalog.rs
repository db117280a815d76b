//! Catalog inspection command handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use modforge::Catalog;

use crate::config::Config;

/// Handle the catalog command
pub fn handle(data: Option<PathBuf>, materials_only: bool, modules_only: bool) -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir(data);

    let catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    let show_all = !materials_only && !modules_only;

    if materials_only || show_all {
        println!("Materials ({}):", catalog.materials.len());
        for material in &catalog.materials {
            println!(
                "  {} - tier {}, durability {}, {} level {}",
                material.key,
                material.tier,
                material.durability,
                material.capability,
                material.capability_level
            );
        }
    }

    if modules_only || show_all {
        println!("Module families ({}):", catalog.modules.len());
        for module in &catalog.modules {
            let variants: Vec<&str> = module
                .variants
                .iter()
                .map(|v| v.material.as_str())
                .collect();
            println!(
                "  {} - prefix '{}', {} variants [{}]",
                module.settings.module,
                module.settings.prefix,
                module.variants.len(),
                variants.join(", ")
            );
        }
    }

    Ok(())
}
