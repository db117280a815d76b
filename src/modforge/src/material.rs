//! Material records
//!
//! A material record describes one crafting material and the modifiers it
//! carries: colors, tier, durability, the item or tag consumed when crafting
//! with it, the tool capability needed to work it, and any enchantment or
//! item-effect bonuses it grants. Records are authored in the catalog data
//! files and shared read-only across a whole generation run.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Capability
// ============================================================================

/// Tool capability required to work a material (e.g. shaping metal needs a
/// hammer, cutting fibrous materials needs a blade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Hammer,
    Axe,
    Cut,
    Pry,
}

impl Capability {
    /// Capability name as it appears in generated documents
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Hammer => "hammer",
            Capability::Axe => "axe",
            Capability::Cut => "cut",
            Capability::Pry => "pry",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// How the crafting outcome is matched: any item carrying a tag, or one
/// specific item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Tag,
    Item,
}

/// The material/quantity required to craft or repair a variant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutcomeSpec {
    pub kind: OutcomeKind,
    /// Tag id (e.g. `forge:ingots/tin`) or item id, depending on `kind`
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

// ============================================================================
// Bonuses
// ============================================================================

/// An enchantment granted by a material, copied verbatim into variant entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentBonus {
    pub enchantment: String,
    pub level: i64,
}

/// A named item effect granted by a material, copied verbatim into variant
/// entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectBonus {
    pub effect: String,
    pub magnitude: f64,
}

// ============================================================================
// Material record
// ============================================================================

/// One crafting material and its modifiers.
///
/// `key` doubles as the data key and the localization key suffix, so it must
/// be non-empty and unique across the run; the catalog loader enforces both.
/// `references` is ordered most-specific first and is only used for template
/// matching, it is never written to output.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    pub key: String,
    /// Display name used when formatting variant names
    pub localization: String,
    /// Primary tint, hex without a leading `#`
    pub tint: String,
    /// Secondary (glyph) tint; defaults to the primary tint
    #[serde(default)]
    tint_secondary: Option<String>,
    pub tier: u8,
    pub durability: f64,
    pub outcome: OutcomeSpec,
    pub capability: Capability,
    pub capability_level: i64,
    /// Template reference keys, most specific first
    pub references: Vec<String>,
    #[serde(default)]
    pub enchantments: Vec<EnchantmentBonus>,
    #[serde(default)]
    pub effects: Vec<EffectBonus>,
    /// Extra named attributes merged verbatim into variant entries
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

impl MaterialRecord {
    /// Secondary tint, falling back to the primary when the material only
    /// defines one color. Both slots are always available to the builder.
    pub fn tint_secondary(&self) -> &str {
        self.tint_secondary.as_deref().unwrap_or(&self.tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_material(toml_str: &str) -> MaterialRecord {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_parse_minimal_material() {
        let m = parse_material(
            r#"
            key = "tin"
            localization = "tin"
            tint = "d9f3cc"
            tier = 0
            durability = 72
            outcome = { kind = "tag", id = "forge:ingots/tin" }
            capability = "hammer"
            capability_level = 1
            references = ["iron"]
            "#,
        );

        assert_eq!(m.key, "tin");
        assert_eq!(m.outcome.kind, OutcomeKind::Tag);
        assert_eq!(m.outcome.quantity, 1.0); // defaulted
        assert_eq!(m.capability, Capability::Hammer);
        assert!(m.enchantments.is_empty());
        assert!(m.effects.is_empty());
        assert!(m.attributes.is_empty());
    }

    #[test]
    fn test_secondary_tint_falls_back_to_primary() {
        let m = parse_material(
            r#"
            key = "tin"
            localization = "tin"
            tint = "d9f3cc"
            tier = 0
            durability = 72
            outcome = { kind = "tag", id = "forge:ingots/tin" }
            capability = "hammer"
            capability_level = 1
            references = ["iron"]
            "#,
        );
        assert_eq!(m.tint_secondary(), "d9f3cc");

        let m = parse_material(
            r#"
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
            "#,
        );
        assert_eq!(m.tint_secondary(), "9f3ccf");
    }

    #[test]
    fn test_parse_bonuses_and_attributes() {
        let m = parse_material(
            r#"
            key = "amethyst"
            localization = "amethyst"
            tint = "9f3ccf"
            tier = 3
            durability = 70
            outcome = { kind = "item", id = "mysticalworld:amethyst_gem", quantity = 2 }
            capability = "hammer"
            capability_level = 2
            references = ["diamond"]
            enchantments = [
                { enchantment = "enchantment/looting", level = 1 },
                { enchantment = "enchantment/fortune", level = 1 },
            ]
            effects = [{ effect = "arcane", magnitude = 0.5 }]

            [attributes]
            reach = 0.25
            "#,
        );

        assert_eq!(m.outcome.kind, OutcomeKind::Item);
        assert_eq!(m.outcome.quantity, 2.0);
        assert_eq!(m.enchantments.len(), 2);
        assert_eq!(m.enchantments[0].enchantment, "enchantment/looting");
        assert_eq!(m.effects[0].magnitude, 0.5);
        assert_eq!(m.attributes.get("reach"), Some(&0.25));
    }

    #[test]
    fn test_capability_as_str() {
        assert_eq!(Capability::Hammer.as_str(), "hammer");
        assert_eq!(Capability::Cut.to_string(), "cut");
    }
}
