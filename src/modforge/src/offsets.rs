//! Offset rules and per-family module settings
//!
//! Each module family configures how numeric values from its reference
//! template are transformed when deriving a variant: an additive delta plus a
//! multiplicative factor for outcome quantity, durability, and mining speed,
//! and an additive-only delta for integrity. Unset rules are the identity.

use serde::Deserialize;

// ============================================================================
// Offset rule
// ============================================================================

/// A `(base + add) * multiply` transformation rule
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Offset {
    #[serde(default)]
    pub add: f64,
    #[serde(default = "one")]
    pub multiply: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for Offset {
    fn default() -> Self {
        Offset {
            add: 0.0,
            multiply: 1.0,
        }
    }
}

impl Offset {
    pub fn new(add: f64, multiply: f64) -> Self {
        Offset { add, multiply }
    }

    /// Apply the rule to a base value. Results are passed through as-is,
    /// negative values included.
    pub fn apply(self, base: f64) -> f64 {
        (base + self.add) * self.multiply
    }

    /// True when applying the rule leaves every value unchanged
    pub fn is_identity(self) -> bool {
        self.add == 0.0 && self.multiply == 1.0
    }
}

// ============================================================================
// Module settings
// ============================================================================

/// Configuration for one module family: naming, template lookup, and the
/// four offset rules. Built once during catalog loading and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSettings {
    /// Module resource path, e.g. `double/basic_axe`
    pub module: String,
    /// Variant key prefix; keys become `<prefix>/<material-key>`
    pub prefix: String,
    /// Display-name pattern with one `%s` placeholder for the material name
    pub localization: String,
    /// Variant key used as base when no material reference matches
    pub fallback: String,
    /// Output path for the family's schema document
    pub schema_path: String,
    #[serde(default)]
    pub outcome: Offset,
    #[serde(default)]
    pub durability: Offset,
    #[serde(default)]
    pub speed: Offset,
    /// Additive-only integrity delta; 0 means no integrity field is emitted
    #[serde(default)]
    pub integrity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_default() {
        let o = Offset::default();
        assert!(o.is_identity());
        assert_eq!(o.apply(251.0), 251.0);
    }

    #[test]
    fn test_apply_add_then_multiply() {
        // The additive delta is applied before the factor
        let o = Offset::new(-20.0, 0.75);
        assert_eq!(o.apply(251.0), 173.25);
    }

    #[test]
    fn test_negative_results_are_not_clamped() {
        let o = Offset::new(-100.0, 1.0);
        assert_eq!(o.apply(30.0), -70.0);

        let o = Offset::new(0.0, -2.0);
        assert_eq!(o.apply(5.0), -10.0);
    }

    #[test]
    fn test_is_identity() {
        assert!(Offset::new(0.0, 1.0).is_identity());
        assert!(!Offset::new(1.0, 1.0).is_identity());
        assert!(!Offset::new(0.0, 0.5).is_identity());
    }

    #[test]
    fn test_partial_offset_deserializes_with_identity_defaults() {
        let o: Offset = toml::from_str("add = 2").unwrap();
        assert_eq!(o, Offset::new(2.0, 1.0));

        let o: Offset = toml::from_str("multiply = 0.5").unwrap();
        assert_eq!(o, Offset::new(0.0, 0.5));
    }

    #[test]
    fn test_module_settings_defaults() {
        let s: ModuleSettings = toml::from_str(
            r#"
            module = "double/butt"
            prefix = "butt"
            localization = "%s butt"
            fallback = "butt/iron"
            schema_path = "double/butt/butt"
            outcome = { add = 1, multiply = -1 }
            "#,
        )
        .unwrap();

        assert_eq!(s.outcome, Offset::new(1.0, -1.0));
        assert!(s.durability.is_identity());
        assert!(s.speed.is_identity());
        assert_eq!(s.integrity, 0);
    }
}
