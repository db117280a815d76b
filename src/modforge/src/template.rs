//! Reference template loading
//!
//! Templates are the pre-authored module documents (the iron/oak/diamond
//! baselines) that derivation starts from. They live in a read-only
//! reference directory: `modules/<module-path>.json` for module documents
//! and `schemas/<schema-path>.json` for the pass-through schema files.
//!
//! Nothing at this boundary is allowed to fail the run: a missing file, an
//! unreadable file, and malformed JSON all log a warning and come back as
//! "no template", leaving derivation to proceed against default values.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

/// Read-only access to the reference template namespace
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TemplateStore { root: root.into() }
    }

    /// Load the reference document for a module family, or `None` when it is
    /// missing or unreadable. Called once per family per run.
    pub fn lookup(&self, module: &str) -> Option<Map<String, Value>> {
        let path = self.root.join("modules").join(format!("{module}.json"));
        match self.read_json(&path)? {
            Value::Object(map) => Some(map),
            _ => {
                warn!(module, path = %path.display(), "reference template is not a JSON object");
                None
            }
        }
    }

    /// Load the schema document for a family, copied through unchanged
    pub fn lookup_schema(&self, schema_path: &str) -> Option<Value> {
        let path = self.root.join("schemas").join(format!("{schema_path}.json"));
        self.read_json(&path)
    }

    fn read_json(&self, path: &Path) -> Option<Value> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reference document not available");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "reference document is not valid JSON");
                None
            }
        }
    }
}
