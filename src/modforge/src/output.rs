//! Output writing
//!
//! Persists a run's generated documents: module documents under
//! `data/<namespace>/modules/`, schema documents under
//! `data/<namespace>/schemas/`, and the flat localization map as
//! `temp/modules_<lang>.json`. A file whose on-disk bytes already match the
//! new content is skipped, so repeated runs with unchanged inputs touch
//! nothing. Each save is independent: an I/O failure is logged and counted,
//! never propagated, and the remaining documents are still written.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error};

use crate::aggregate::GeneratedData;

/// Per-run write statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Writes generated documents beneath an output root
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
    namespace: String,
    lang: String,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>, lang: impl Into<String>) -> Self {
        OutputWriter {
            root: root.into(),
            namespace: namespace.into(),
            lang: lang.into(),
        }
    }

    /// Persist every document in the run. Failures are reflected in the
    /// report, not returned.
    pub fn write_all(&self, data: &GeneratedData) -> WriteReport {
        let mut report = WriteReport::default();

        for module in &data.modules {
            let path = self
                .root
                .join("data")
                .join(&self.namespace)
                .join("modules")
                .join(format!("{}.json", module.module));
            self.save(&path, &module.document, &mut report);
        }

        for schema in &data.schemas {
            let path = self
                .root
                .join("data")
                .join(&self.namespace)
                .join("schemas")
                .join(format!("{}.json", schema.schema_path));
            self.save(&path, &schema.document, &mut report);
        }

        let localization_path = self
            .root
            .join("temp")
            .join(format!("modules_{}.json", self.lang));
        self.save(
            &localization_path,
            &Value::Object(data.localization.clone()),
            &mut report,
        );

        report
    }

    fn save(&self, path: &Path, document: &Value, report: &mut WriteReport) {
        let contents = match serde_json::to_string_pretty(document) {
            Ok(contents) => contents,
            Err(e) => {
                error!(path = %path.display(), error = %e, "couldn't serialize document");
                report.failed += 1;
                return;
            }
        };

        // Unchanged content is left alone so downstream tooling sees stable
        // modification times
        if let Ok(existing) = std::fs::read(path) {
            if existing == contents.as_bytes() {
                debug!(path = %path.display(), "unchanged, skipping");
                report.skipped += 1;
                return;
            }
        }

        if let Err(e) = persist(path, &contents) {
            error!(path = %path.display(), error = %e, "couldn't save document");
            report.failed += 1;
        } else {
            debug!(path = %path.display(), "saved");
            report.written += 1;
        }
    }

}

fn persist(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}
