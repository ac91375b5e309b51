//! Pipeline configuration: variables, rules, thresholds.
//!
//! The configuration surface is plain serde-serializable data, constructed
//! once at startup and compiled into an immutable
//! [`HybridPipeline`](crate::inference::HybridPipeline). Rule weights and
//! the decision threshold are provisional tuning knobs, not learned values.
//!
//! # Example
//!
//! ```
//! use corazon::config::PipelineConfig;
//!
//! let config = PipelineConfig::heart_disease();
//! let json = serde_json::to_string(&config).unwrap();
//! let back = PipelineConfig::from_json(&json).unwrap();
//! assert_eq!(back.threshold, 50.0);
//! ```

use crate::error::{CorazonError, Result};
use crate::fuzzy::{LinguisticVariable, MembershipFunction};
use crate::rules::Rule;
use serde::{Deserialize, Serialize};

/// Complete pipeline configuration.
///
/// `probability_variable` names the linguistic variable fed by the
/// external predictor instead of a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Crisp decision cutoff on the output domain (decision = score >= threshold).
    pub threshold: f32,
    /// Probability cutoff for the standalone predictor baseline.
    #[serde(default = "default_nn_threshold")]
    pub nn_threshold: f32,
    /// Centroid sampling resolution over the output domain.
    #[serde(default = "default_resolution")]
    pub resolution: f32,
    /// Name of the predictor-sourced input variable.
    pub probability_variable: String,
    /// Input linguistic variables (including the predictor-sourced one).
    pub variables: Vec<LinguisticVariable>,
    /// Output linguistic variable.
    pub output: LinguisticVariable,
    /// The fixed rule set.
    pub rules: Vec<Rule>,
}

fn default_nn_threshold() -> f32 {
    0.5
}

fn default_resolution() -> f32 {
    1.0
}

impl PipelineConfig {
    /// The fixed heart-disease configuration.
    ///
    /// Ages span [20, 80] and serum cholesterol [100, 400], each split into
    /// three evenly-spaced terms; the predictor probability spans [0, 1].
    /// Risk is scored on [0, 100] with a decision cut at 50. The original
    /// disjunctive rule "probability high OR age senior" appears as two
    /// rules sharing the high consequent.
    #[must_use]
    pub fn heart_disease() -> Self {
        Self {
            threshold: 50.0,
            nn_threshold: 0.5,
            resolution: 1.0,
            probability_variable: "nn_probability".to_string(),
            variables: vec![
                LinguisticVariable::new("age", 20.0, 80.0)
                    .with_auto_terms(&["young", "middle", "senior"]),
                LinguisticVariable::new("cholesterol", 100.0, 400.0)
                    .with_field("chol")
                    .with_auto_terms(&["low", "normal", "high"]),
                LinguisticVariable::new("nn_probability", 0.0, 1.0)
                    .with_auto_terms(&["low", "medium", "high"]),
            ],
            output: LinguisticVariable::new("risk", 0.0, 100.0)
                .with_term("low", MembershipFunction::triangular(0.0, 25.0, 50.0))
                .with_term("medium", MembershipFunction::triangular(25.0, 50.0, 75.0))
                .with_term("high", MembershipFunction::triangular(50.0, 75.0, 100.0)),
            rules: vec![
                Rule::if_all(&[("age", "senior"), ("cholesterol", "high")]).then("high"),
                Rule::if_all(&[("nn_probability", "high")]).then("high"),
                Rule::if_all(&[("age", "senior")]).then("high"),
                Rule::if_all(&[("nn_probability", "medium"), ("cholesterol", "normal")])
                    .then("medium"),
                Rule::if_all(&[("nn_probability", "low"), ("age", "young")]).then("low"),
                Rule::if_all(&[("cholesterol", "low")]).then("low"),
            ],
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// [`CorazonError::InvalidConfig`] on malformed JSON. Semantic
    /// validation happens when the pipeline is built.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CorazonError::invalid_config(&format!("JSON parse failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::HybridPipeline;

    #[test]
    fn test_heart_disease_config_builds() {
        let pipeline = HybridPipeline::from_config(PipelineConfig::heart_disease());
        assert!(pipeline.is_ok());
    }

    #[test]
    fn test_heart_disease_rule_count() {
        // Five original rules, one disjunction split in two.
        assert_eq!(PipelineConfig::heart_disease().rules.len(), 6);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PipelineConfig::heart_disease();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back = PipelineConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_malformed_json_is_invalid_config() {
        let err = PipelineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, CorazonError::InvalidConfig { .. }));
    }

    #[test]
    fn test_undeclared_probability_variable_rejected() {
        let mut config = PipelineConfig::heart_disease();
        config.probability_variable = "posterior".to_string();
        let err = HybridPipeline::from_config(config).unwrap_err();
        assert!(matches!(err, CorazonError::InvalidConfig { .. }));
    }

    #[test]
    fn test_threshold_outside_domain_rejected() {
        let mut config = PipelineConfig::heart_disease();
        config.threshold = 120.0;
        let err = HybridPipeline::from_config(config).unwrap_err();
        assert!(matches!(err, CorazonError::InvalidConfig { .. }));
    }

    #[test]
    fn test_dangling_rule_rejected() {
        let mut config = PipelineConfig::heart_disease();
        config
            .rules
            .push(Rule::if_all(&[("blood_pressure", "high")]).then("high"));
        let err = HybridPipeline::from_config(config).unwrap_err();
        assert!(matches!(err, CorazonError::UnknownTerm { .. }));
    }
}
