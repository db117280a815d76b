//! Run aggregation
//!
//! Drives the variant builder across the whole catalog: one reference
//! template lookup per module family, one derived variant entry per
//! (family, material) pair, then assembly of the output collections — a
//! module document per family (existing template variants kept, derived
//! ones merged in), a pass-through schema document per family, and one flat
//! localization map across all families.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::template::TemplateStore;
use crate::variant;

/// A generated module document, keyed by the family's module path
#[derive(Debug, Clone)]
pub struct ModuleDocument {
    pub module: String,
    pub document: Value,
}

/// A schema document copied through from the reference namespace
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub schema_path: String,
    pub document: Value,
}

/// Everything one generation run produces, in catalog order
#[derive(Debug, Clone, Default)]
pub struct GeneratedData {
    pub modules: Vec<ModuleDocument>,
    pub schemas: Vec<SchemaDocument>,
    /// Flat key -> display-name map; later entries overwrite earlier ones
    pub localization: Map<String, Value>,
}

impl GeneratedData {
    pub fn variant_count(&self) -> usize {
        self.localization.len()
    }
}

/// One-shot driver for a generation run. Owns nothing beyond the run's
/// accumulated output and is discarded afterwards.
pub struct Aggregator {
    /// Namespace prefixed onto localization keys (and used by the writer
    /// for output paths)
    namespace: String,
}

impl Aggregator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Aggregator {
            namespace: namespace.into(),
        }
    }

    /// Run the variant builder across the catalog and collect all outputs
    pub fn run(&self, catalog: &Catalog, store: &TemplateStore) -> GeneratedData {
        let mut data = GeneratedData::default();

        for entry in &catalog.modules {
            let settings = &entry.settings;
            let template = store.lookup(&settings.module);

            let template_variants = template
                .as_ref()
                .and_then(|doc| doc.get("variants"))
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();

            // Existing variants stay; derived ones are added on top with
            // silent last-write-wins on key collisions
            let mut merged = template_variants.clone();

            for spec in &entry.variants {
                let Some(material) = catalog.material(&spec.material) else {
                    // The catalog loader validates references, so this only
                    // triggers for hand-built catalogs
                    warn!(
                        module = %settings.module,
                        material = %spec.material,
                        "skipping unknown material"
                    );
                    continue;
                };

                let base = variant::select_base(
                    &material.references,
                    &settings.fallback,
                    &template_variants,
                );
                let (key, derived) = variant::build_variant(material, settings, base);
                debug!(module = %settings.module, key = %key, "derived variant");
                merged.insert(key, derived);

                data.localization.insert(
                    variant::localization_key(&self.namespace, settings, material),
                    Value::String(variant::localization_value(
                        settings,
                        material,
                        spec.name.as_deref(),
                    )),
                );
            }

            let mut document = template.unwrap_or_default();
            document.insert("variants".to_string(), Value::Object(merged));
            data.modules.push(ModuleDocument {
                module: settings.module.clone(),
                document: Value::Object(document),
            });

            match store.lookup_schema(&settings.schema_path) {
                Some(schema) => data.schemas.push(SchemaDocument {
                    schema_path: settings.schema_path.clone(),
                    document: schema,
                }),
                None => warn!(
                    module = %settings.module,
                    schema_path = %settings.schema_path,
                    "no schema document to copy through"
                ),
            }
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const MATERIALS: &str = r#"
        [[materials]]
        key = "tin"
        localization = "tin"
        tint = "d9f3cc"
        tier = 0
        durability = 72
        outcome = { kind = "tag", id = "forge:ingots/tin" }
        capability = "hammer"
        capability_level = 1
        references = ["iron"]

        [[materials]]
        key = "amethyst"
        localization = "amethyst"
        tint = "d9f3cc"
        tint_secondary = "9f3ccf"
        tier = 3
        durability = 70
        outcome = { kind = "tag", id = "forge:gems/amethyst" }
        capability = "hammer"
        capability_level = 2
        references = ["diamond"]
    "#;

    const MODULES: &str = r#"
        [[modules]]
        module = "double/basic_axe"
        prefix = "basic_axe"
        localization = "%s axe"
        fallback = "basic_axe/iron"
        schema_path = "double/basic_axe/basic_axe"
        outcome = { add = 2 }
        durability = { add = -20, multiply = 0.75 }
        speed = { add = -0.1 }
        variants = [{ material = "amethyst" }, { material = "tin" }]
    "#;

    fn catalog_from(materials: &str, modules: &str) -> (TempDir, Catalog) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("materials.toml"), materials).unwrap();
        fs::write(dir.path().join("modules.toml"), modules).unwrap();
        let catalog = Catalog::load(dir.path()).unwrap();
        (dir, catalog)
    }

    fn reference_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let modules = dir.path().join("modules/double");
        fs::create_dir_all(&modules).unwrap();
        fs::write(
            modules.join("basic_axe.json"),
            serde_json::to_string_pretty(&json!({
                "slots": ["head"],
                "variants": {
                    "basic_axe/iron": {
                        "key": "basic_axe/iron",
                        "material": { "tag": "forge:ingots/iron", "count": 2 },
                        "durability": 251,
                        "miningSpeed": 1.0
                    }
                }
            }))
            .unwrap(),
        )
        .unwrap();

        let schemas = dir.path().join("schemas/double/basic_axe");
        fs::create_dir_all(&schemas).unwrap();
        fs::write(schemas.join("basic_axe.json"), r#"{ "slots": ["head"] }"#).unwrap();
        dir
    }

    #[test]
    fn test_run_merges_existing_and_derived_variants() {
        let (_cat_dir, catalog) = catalog_from(MATERIALS, MODULES);
        let reference = reference_dir();
        let store = TemplateStore::new(reference.path());

        let data = Aggregator::new("tetra").run(&catalog, &store);

        assert_eq!(data.modules.len(), 1);
        let doc = &data.modules[0].document;
        let variants = doc["variants"].as_object().unwrap();
        // Existing iron variant kept, two derived variants added
        assert_eq!(variants.len(), 3);
        assert_eq!(variants["basic_axe/iron"]["durability"], json!(251));
        assert_eq!(variants["basic_axe/tin"]["durability"], json!(173.25));
        assert_eq!(variants["basic_axe/amethyst"]["durability"], json!(173.25));
        // Non-variant template fields pass through
        assert_eq!(doc["slots"], json!(["head"]));

        assert_eq!(data.schemas.len(), 1);
        assert_eq!(data.schemas[0].schema_path, "double/basic_axe/basic_axe");

        assert_eq!(
            data.localization["tetra.variant.basic_axe/tin"],
            json!("tin axe")
        );
        assert_eq!(
            data.localization["tetra.variant.basic_axe/amethyst"],
            json!("amethyst axe")
        );
    }

    #[test]
    fn test_run_without_reference_namespace() {
        let (_cat_dir, catalog) = catalog_from(MATERIALS, MODULES);
        let empty = TempDir::new().unwrap();
        let store = TemplateStore::new(empty.path());

        let data = Aggregator::new("tetra").run(&catalog, &store);

        // Degrades to defaults: module document still produced, no schema
        assert_eq!(data.modules.len(), 1);
        assert!(data.schemas.is_empty());
        let variants = data.modules[0].document["variants"].as_object().unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants["basic_axe/tin"]["durability"], json!(-15));
    }

    #[test]
    fn test_duplicate_material_entries_last_write_wins() {
        let modules = MODULES.replace(
            r#"variants = [{ material = "amethyst" }, { material = "tin" }]"#,
            r#"variants = [{ material = "tin", name = "first tin" }, { material = "tin", name = "second tin" }]"#,
        );
        let (_cat_dir, catalog) = catalog_from(MATERIALS, &modules);
        let reference = reference_dir();
        let store = TemplateStore::new(reference.path());

        let data = Aggregator::new("tetra").run(&catalog, &store);

        let variants = data.modules[0].document["variants"].as_object().unwrap();
        // iron + one tin entry; the duplicate overwrote silently
        assert_eq!(variants.len(), 2);
        assert_eq!(
            data.localization["tetra.variant.basic_axe/tin"],
            json!("second tin axe")
        );
    }

    #[test]
    fn test_name_override_reaches_localization() {
        let modules = MODULES.replace(
            r#"{ material = "tin" }"#,
            r#"{ material = "tin", name = "pewter" }"#,
        );
        let (_cat_dir, catalog) = catalog_from(MATERIALS, &modules);
        let reference = reference_dir();
        let store = TemplateStore::new(reference.path());

        let data = Aggregator::new("tetra").run(&catalog, &store);
        assert_eq!(
            data.localization["tetra.variant.basic_axe/tin"],
            json!("pewter axe")
        );
    }

    #[test]
    fn test_localization_spans_families_in_catalog_order() {
        let modules = format!(
            "{MODULES}\n{}",
            r#"
            [[modules]]
            module = "double/butt"
            prefix = "butt"
            localization = "%s butt"
            fallback = "butt/iron"
            schema_path = "double/butt/butt"
            variants = [{ material = "tin" }]
            "#
        );
        let (_cat_dir, catalog) = catalog_from(MATERIALS, &modules);
        let reference = reference_dir();
        let store = TemplateStore::new(reference.path());

        let data = Aggregator::new("tetra").run(&catalog, &store);

        let keys: Vec<&String> = data.localization.keys().collect();
        assert_eq!(
            keys,
            vec![
                "tetra.variant.basic_axe/amethyst",
                "tetra.variant.basic_axe/tin",
                "tetra.variant.butt/tin",
            ]
        );
    }
}
