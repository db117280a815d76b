//! Catalog loading
//!
//! The catalog is the externalized generation plan: `materials.toml` holds
//! the material records, `modules.toml` holds one entry per module family
//! (its settings plus the ordered list of materials to derive variants for).
//! Loading validates cross-references up front; a broken catalog is an
//! authoring error and aborts the run, unlike the degrade-and-continue
//! policy applied to reference templates and output writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::material::MaterialRecord;
use crate::offsets::ModuleSettings;

pub const MATERIALS_FILE: &str = "materials.toml";
pub const MODULES_FILE: &str = "modules.toml";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file '{file}' not found in {dir}")]
    MissingFile { file: &'static str, dir: PathBuf },

    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    #[error("material key must not be empty (in {file})")]
    EmptyMaterialKey { file: PathBuf },

    #[error("duplicate material key '{key}'")]
    DuplicateMaterial { key: String },

    #[error("module '{module}' references unknown material '{material}'")]
    UnknownMaterial { module: String, material: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Catalog model
// ============================================================================

/// One material slot in a module family's variant list
#[derive(Debug, Clone, Deserialize)]
pub struct VariantSpec {
    /// Material key, must exist in the materials file
    pub material: String,
    /// Optional display-name override used instead of the material's own name
    #[serde(default)]
    pub name: Option<String>,
}

/// One module family: its settings plus the materials to derive
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleEntry {
    #[serde(flatten)]
    pub settings: ModuleSettings,
    #[serde(default)]
    pub variants: Vec<VariantSpec>,
}

#[derive(Debug, Deserialize)]
struct MaterialsFile {
    #[serde(default)]
    materials: Vec<MaterialRecord>,
}

#[derive(Debug, Deserialize)]
struct ModulesFile {
    #[serde(default)]
    modules: Vec<ModuleEntry>,
}

/// The loaded generation plan, shared read-only across one run
#[derive(Debug)]
pub struct Catalog {
    pub materials: Vec<MaterialRecord>,
    pub modules: Vec<ModuleEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load and validate the catalog from a data directory containing
    /// `materials.toml` and `modules.toml`.
    pub fn load(dir: &Path) -> Result<Catalog, CatalogError> {
        let materials_path = require_file(dir, MATERIALS_FILE)?;
        let modules_path = require_file(dir, MODULES_FILE)?;

        let materials: MaterialsFile = parse_toml(&materials_path)?;
        let modules: ModulesFile = parse_toml(&modules_path)?;

        Catalog::build(materials.materials, modules.modules, &materials_path)
    }

    fn build(
        materials: Vec<MaterialRecord>,
        modules: Vec<ModuleEntry>,
        materials_path: &Path,
    ) -> Result<Catalog, CatalogError> {
        let mut index = HashMap::new();
        for (i, material) in materials.iter().enumerate() {
            if material.key.is_empty() {
                return Err(CatalogError::EmptyMaterialKey {
                    file: materials_path.to_path_buf(),
                });
            }
            if index.insert(material.key.clone(), i).is_some() {
                return Err(CatalogError::DuplicateMaterial {
                    key: material.key.clone(),
                });
            }
        }

        for module in &modules {
            for variant in &module.variants {
                if !index.contains_key(&variant.material) {
                    return Err(CatalogError::UnknownMaterial {
                        module: module.settings.module.clone(),
                        material: variant.material.clone(),
                    });
                }
            }
        }

        Ok(Catalog {
            materials,
            modules,
            index,
        })
    }

    /// Look up a material record by key
    pub fn material(&self, key: &str) -> Option<&MaterialRecord> {
        self.index.get(key).map(|&i| &self.materials[i])
    }
}

fn require_file(dir: &Path, file: &'static str) -> Result<PathBuf, CatalogError> {
    let path = dir.join(file);
    if path.exists() {
        Ok(path)
    } else {
        Err(CatalogError::MissingFile {
            file,
            dir: dir.to_path_buf(),
        })
    }
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|e| CatalogError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    })
}
