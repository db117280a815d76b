//! Variant derivation
//!
//! The core of the generator: given a material record, a module family's
//! settings, and (optionally) a base variant selected from the family's
//! reference template, produce one derived variant entry plus its
//! localization entry.
//!
//! Base selection walks the material's reference keys in order, most
//! specific first, and picks the first template variant whose key equals the
//! reference key or ends with `/<reference-key>`. When nothing matches, the
//! family's configured fallback key is tried; when that is absent too the
//! derivation still proceeds against zero/identity base values. Selection
//! never fails.

use serde_json::{json, Map, Value};

use crate::material::{MaterialRecord, OutcomeKind};
use crate::offsets::ModuleSettings;

// ============================================================================
// Base selection
// ============================================================================

/// Select the base variant for a material from a template's variants map.
///
/// Returns `None` only when neither the reference keys nor the fallback key
/// match; derivation then runs against implicit zero defaults.
pub fn select_base<'a>(
    references: &[String],
    fallback: &str,
    variants: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    for reference in references {
        let suffix = format!("/{reference}");
        let hit = variants
            .iter()
            .find(|(key, _)| key.as_str() == reference.as_str() || key.ends_with(&suffix))
            .and_then(|(_, value)| value.as_object());
        if hit.is_some() {
            return hit;
        }
    }

    variants.get(fallback).and_then(Value::as_object)
}

// ============================================================================
// Derivation
// ============================================================================

/// Derive one variant entry. Returns the variant key
/// (`<prefix>/<material-key>`) and the entry document.
pub fn build_variant(
    material: &MaterialRecord,
    settings: &ModuleSettings,
    base: Option<&Map<String, Value>>,
) -> (String, Value) {
    let mut entry = base.cloned().unwrap_or_default();
    let key = format!("{}/{}", settings.prefix, material.key);

    entry.insert("key".to_string(), Value::String(key.clone()));

    // Outcome: kind and id always come from the material record, the
    // quantity comes from the base entry's count run through the rule.
    // A base without a count falls back to the record's own quantity.
    let base_count = entry
        .get("material")
        .and_then(|m| m.get("count"))
        .and_then(Value::as_f64)
        .unwrap_or(material.outcome.quantity);
    let count = settings.outcome.apply(base_count);
    let outcome_field = match material.outcome.kind {
        OutcomeKind::Tag => "tag",
        OutcomeKind::Item => "item",
    };
    entry.insert(
        "material".to_string(),
        json!({ outcome_field: material.outcome.id, "count": number(count) }),
    );

    let base_durability = field_f64(&entry, "durability");
    entry.insert(
        "durability".to_string(),
        number(settings.durability.apply(base_durability)),
    );

    // Older templates call the speed field "speed"; keep whichever slot the
    // base used so the entry stays shaped like its template.
    let speed_key = if entry.contains_key("speed") && !entry.contains_key("miningSpeed") {
        "speed"
    } else {
        "miningSpeed"
    };
    let base_speed = field_f64(&entry, speed_key);
    entry.insert(speed_key.to_string(), number(settings.speed.apply(base_speed)));

    // Integrity is additive-only and only present when a non-zero delta is
    // configured; an identity rule must leave no integrity field at all.
    if settings.integrity != 0 {
        let base_integrity = entry
            .get("integrity")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        entry.insert(
            "integrity".to_string(),
            Value::from(base_integrity + settings.integrity),
        );
    } else {
        entry.shift_remove("integrity");
    }

    let capability = material.capability.as_str();
    entry.insert(
        "requiredCapabilities".to_string(),
        json!({ capability: material.capability_level }),
    );

    apply_tints(&mut entry, material);

    if !material.enchantments.is_empty() {
        let enchantments: Vec<Value> = material
            .enchantments
            .iter()
            .map(|b| json!({ "enchantment": b.enchantment, "level": b.level }))
            .collect();
        entry.insert("enchantments".to_string(), Value::Array(enchantments));
    }

    if !material.effects.is_empty() {
        let effects: Vec<Value> = material
            .effects
            .iter()
            .map(|b| json!({ "effect": b.effect, "magnitude": number(b.magnitude) }))
            .collect();
        entry.insert("effects".to_string(), Value::Array(effects));
    }

    // Extra attributes merge last so they can overwrite anything above
    for (name, value) in &material.attributes {
        entry.insert(name.clone(), number(*value));
    }

    (key, Value::Object(entry))
}

/// Fill the base's tint slots: the top-level `tint` gets the primary color,
/// a nested `glyph.tint` gets the secondary. A base with neither slot still
/// gets a `tint` so the color survives into the output.
fn apply_tints(entry: &mut Map<String, Value>, material: &MaterialRecord) {
    let mut slotted = false;

    if entry.contains_key("tint") {
        entry.insert("tint".to_string(), Value::String(material.tint.clone()));
        slotted = true;
    }

    if let Some(glyph) = entry.get_mut("glyph").and_then(Value::as_object_mut) {
        if glyph.contains_key("tint") {
            glyph.insert(
                "tint".to_string(),
                Value::String(material.tint_secondary().to_string()),
            );
            slotted = true;
        }
    }

    if !slotted {
        entry.insert("tint".to_string(), Value::String(material.tint.clone()));
    }
}

fn field_f64(entry: &Map<String, Value>, key: &str) -> f64 {
    entry.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// JSON number that stays an integer when the value is whole, so derived
/// documents keep the look of their hand-authored templates
pub(crate) fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

// ============================================================================
// Localization
// ============================================================================

/// Localization key for a variant: `<namespace>.variant.<prefix>/<material-key>`
pub fn localization_key(namespace: &str, settings: &ModuleSettings, material: &MaterialRecord) -> String {
    format!("{namespace}.variant.{}/{}", settings.prefix, material.key)
}

/// Formatted display name: the family's `%s` pattern filled with the
/// material's display name, or with the per-variant override when present
pub fn localization_value(
    settings: &ModuleSettings,
    material: &MaterialRecord,
    name_override: Option<&str>,
) -> String {
    let name = name_override.unwrap_or(&material.localization);
    settings.localization.replacen("%s", name, 1)
}
