//! Canonicalization settings.

use rigcanon_rig::parser::{ParseOptions, DEFAULT_WEIGHT_EPSILON};
use serde::{Deserialize, Serialize};

/// Settings for a canonicalization run.
///
/// Every field has a default, so a JSON config file only needs to name the
/// fields it changes:
///
/// ```
/// use rigcanon_engine::CanonicalizeConfig;
///
/// let config = CanonicalizeConfig::from_json(r#"{"merge_chest_root": true}"#).unwrap();
/// assert!(config.merge_chest_root);
/// assert!(config.validate_stages);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanonicalizeConfig {
    /// Skin weights at or below this value are dropped while parsing.
    pub weight_epsilon: f64,
    /// Check the tree invariant after every stage.
    pub validate_stages: bool,
    /// Fold the chest-root joint into Chest after shoulder insertion.
    pub merge_chest_root: bool,
    /// Translate the skeleton so its lowest joint sits at z = 0.
    pub align_to_ground: bool,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            weight_epsilon: DEFAULT_WEIGHT_EPSILON,
            validate_stages: true,
            merge_chest_root: false,
            align_to_ground: false,
        }
    }
}

impl CanonicalizeConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Sets the skin weight threshold.
    pub fn weight_epsilon(mut self, epsilon: f64) -> Self {
        self.weight_epsilon = epsilon;
        self
    }

    /// Enables or disables per-stage tree validation.
    pub fn validate_stages(mut self, enabled: bool) -> Self {
        self.validate_stages = enabled;
        self
    }

    /// Enables or disables chest-root consolidation.
    pub fn merge_chest_root(mut self, enabled: bool) -> Self {
        self.merge_chest_root = enabled;
        self
    }

    /// Enables or disables ground alignment.
    pub fn align_to_ground(mut self, enabled: bool) -> Self {
        self.align_to_ground = enabled;
        self
    }

    /// Returns the parser options implied by this config.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            weight_epsilon: self.weight_epsilon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CanonicalizeConfig::default();
        assert_eq!(config.weight_epsilon, 0.001);
        assert!(config.validate_stages);
        assert!(!config.merge_chest_root);
        assert!(!config.align_to_ground);
    }

    #[test]
    fn test_builder() {
        let config = CanonicalizeConfig::new()
            .weight_epsilon(0.01)
            .validate_stages(false)
            .merge_chest_root(true)
            .align_to_ground(true);
        assert_eq!(config.parse_options().weight_epsilon, 0.01);
        assert!(!config.validate_stages);
        assert!(config.merge_chest_root);
        assert!(config.align_to_ground);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CanonicalizeConfig::from_json(r#"{"align_to_ground": true}"#).unwrap();
        assert_eq!(
            config,
            CanonicalizeConfig {
                align_to_ground: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        assert!(CanonicalizeConfig::from_json(r#"{"merge_chest": true}"#).is_err());
    }
}
