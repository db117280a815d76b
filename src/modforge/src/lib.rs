//! # modforge
//!
//! Build-time data generator for module variants: takes a catalog of
//! material records and per-family offset rules, derives variant entries
//! from pre-authored reference templates, and assembles the module, schema,
//! and localization documents a game mod ships with.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use modforge::{Aggregator, Catalog, OutputWriter, TemplateStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::load(Path::new("data"))?;
//! let store = TemplateStore::new("reference");
//!
//! let data = Aggregator::new("tetra").run(&catalog, &store);
//! let report = OutputWriter::new("out", "tetra", "en_us").write_all(&data);
//!
//! println!("{} variants, {} files written", data.variant_count(), report.written);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod material;
pub mod offsets;
pub mod output;
pub mod template;
pub mod variant;

// Re-export commonly used items
#[doc(inline)]
pub use aggregate::{Aggregator, GeneratedData, ModuleDocument, SchemaDocument};
#[doc(inline)]
pub use catalog::{Catalog, CatalogError, ModuleEntry, VariantSpec};
#[doc(inline)]
pub use material::{
    Capability, EffectBonus, EnchantmentBonus, MaterialRecord, OutcomeKind, OutcomeSpec,
};
#[doc(inline)]
pub use offsets::{ModuleSettings, Offset};
#[doc(inline)]
pub use output::{OutputWriter, WriteReport};
#[doc(inline)]
pub use template::TemplateStore;
