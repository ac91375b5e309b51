//! Aggregation, defuzzification, and the hybrid pipeline.
//!
//! Max-min (Mamdani) inference: each output term's activation is the
//! maximum over rules voting for it of firing strength × rule weight; the
//! output curve is the pointwise maximum of each term's membership clipped
//! at its activation; the crisp score is the centroid of that curve,
//! sampled across the output domain.
//!
//! [`HybridPipeline`] composes the whole per-record computation: fuzzify
//! the record, bridge the predictor's probability in as one more input,
//! evaluate the rule base, defuzzify, threshold. The pipeline is immutable
//! after construction and every inference call is pure, so records can be
//! scored in parallel with shared references.
//!
//! # Example
//!
//! ```
//! use corazon::prelude::*;
//! use corazon::traits::FnPredictor;
//!
//! let pipeline = HybridPipeline::heart_disease();
//! let record = PatientRecord::new()
//!     .with_numeric("age", 70.0)
//!     .with_numeric("chol", 280.0);
//! let model = FnPredictor::new(|_: &PatientRecord| Ok(0.9));
//!
//! let output = pipeline.infer(&record, &model).unwrap();
//! assert_eq!(output.decision, 1);
//! ```

use crate::bridge::bridge;
use crate::config::PipelineConfig;
use crate::error::{CorazonError, Result};
use crate::fuzzy::{Fuzzifier, LinguisticVariable, MembershipVector};
use crate::record::PatientRecord;
use crate::rules::{Rule, RuleBase, RuleFiring};
use crate::traits::Predictor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final per-record result: continuous score plus binary decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrispOutput {
    /// Defuzzified score within the output variable's domain.
    pub score: f32,
    /// 1 if `score >= threshold`, else 0.
    pub decision: u8,
}

/// Combines rule firings into one crisp output.
///
/// Holds the output linguistic variable, the sampling resolution for the
/// centroid, and the crisp decision threshold.
#[derive(Debug, Clone)]
pub struct Defuzzifier {
    output: LinguisticVariable,
    resolution: f32,
    threshold: f32,
}

impl Defuzzifier {
    /// Creates a defuzzifier over the given output variable.
    ///
    /// Default resolution is 1.0 domain units; default threshold is the
    /// domain midpoint.
    #[must_use]
    pub fn new(output: LinguisticVariable) -> Self {
        let (lo, hi) = output.domain();
        Self {
            output,
            resolution: 1.0,
            threshold: (lo + hi) / 2.0,
        }
    }

    /// Sets the centroid sampling resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the crisp decision threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// The output variable.
    #[must_use]
    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    /// The crisp decision threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Per-term activation: max over rules with that consequent of
    /// (firing strength × weight), clipped to [0, 1].
    ///
    /// Firings whose rule index does not resolve against `rules` are
    /// ignored rather than panicking on a caller-supplied mismatch.
    #[must_use]
    pub fn activations(&self, firings: &[RuleFiring], rules: &[Rule]) -> BTreeMap<String, f32> {
        let mut activations: BTreeMap<String, f32> = BTreeMap::new();
        for firing in firings {
            let Some(rule) = rules.get(firing.rule) else {
                continue;
            };
            let vote = (firing.strength * rule.weight).clamp(0.0, 1.0);
            let entry = activations.entry(rule.consequent.clone()).or_insert(0.0);
            *entry = entry.max(vote);
        }
        activations
    }

    /// Defuzzifies rule firings into a crisp score and decision.
    ///
    /// Centroid (center of gravity) of the aggregated output curve. If no
    /// rule fired, the curve is all-zero and the centroid undefined; the
    /// documented policy is to return the domain midpoint as a neutral
    /// default rather than fail.
    #[must_use]
    pub fn defuzzify(&self, firings: &[RuleFiring], rules: &[Rule]) -> CrispOutput {
        let activations = self.activations(firings, rules);
        let (lo, hi) = self.output.domain();

        let mut weighted = 0.0_f64;
        let mut total = 0.0_f64;
        let mut x = lo;
        while x <= hi {
            let mu = self.curve_at(x, &activations);
            weighted += f64::from(x) * f64::from(mu);
            total += f64::from(mu);
            x += self.resolution;
        }

        let score = if total > f64::EPSILON {
            (weighted / total) as f32
        } else {
            (lo + hi) / 2.0
        };
        CrispOutput {
            score,
            decision: u8::from(score >= self.threshold),
        }
    }

    /// Aggregated output membership at `x`: max over terms of
    /// min(activation, term membership).
    fn curve_at(&self, x: f32, activations: &BTreeMap<String, f32>) -> f32 {
        let mut mu = 0.0_f32;
        for term in self.output.terms() {
            if let Some(&activation) = activations.get(&term.name) {
                mu = mu.max(activation.min(term.membership.degree(x)));
            }
        }
        mu
    }

    /// Validates resolution, threshold, and the output variable.
    pub(crate) fn validate(&self) -> Result<()> {
        self.output.validate()?;
        if !(self.resolution > 0.0) {
            return Err(CorazonError::invalid_config(&format!(
                "resolution {} must be positive",
                self.resolution
            )));
        }
        let (lo, hi) = self.output.domain();
        if self.threshold < lo || self.threshold > hi {
            return Err(CorazonError::invalid_config(&format!(
                "threshold {} outside output domain [{lo}, {hi}]",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Per-record inference trace for interpretability.
///
/// Carries every intermediate artifact of one inference call so a caller
/// can explain which rules drove the decision.
#[derive(Debug, Clone)]
pub struct InferenceTrace {
    /// Bridged predictor probability.
    pub probability: f32,
    /// Fuzzified memberships, including the bridged variable.
    pub memberships: MembershipVector,
    /// Firing strength per rule, including zeros.
    pub firings: Vec<RuleFiring>,
    /// Final crisp result.
    pub output: CrispOutput,
}

/// The full hybrid neuro-fuzzy pipeline.
///
/// Fuzzifier, rule base, and defuzzifier are fixed at construction; the
/// external predictor is passed into each call, keeping its architecture
/// fully decoupled from rule evaluation.
#[derive(Debug, Clone)]
pub struct HybridPipeline {
    fuzzifier: Fuzzifier,
    rule_base: RuleBase,
    defuzzifier: Defuzzifier,
    probability_variable: String,
}

impl HybridPipeline {
    /// Builds and validates a pipeline from configuration.
    ///
    /// # Errors
    ///
    /// [`CorazonError::InvalidConfig`] or [`CorazonError::UnknownTerm`] if
    /// the configuration is inconsistent (dangling rule references, empty
    /// domains, out-of-range weights or threshold).
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let mut fuzzifier = Fuzzifier::new();
        let mut probability_declared = false;
        for variable in config.variables {
            if variable.name() == config.probability_variable {
                probability_declared = true;
                fuzzifier = fuzzifier.with_external_variable(variable);
            } else {
                fuzzifier = fuzzifier.with_variable(variable);
            }
        }
        if !probability_declared {
            return Err(CorazonError::invalid_config(&format!(
                "probability variable {} is not declared",
                config.probability_variable
            )));
        }
        fuzzifier.validate()?;

        let defuzzifier = Defuzzifier::new(config.output)
            .with_resolution(config.resolution)
            .with_threshold(config.threshold);
        defuzzifier.validate()?;

        let rule_base = RuleBase::new(config.rules);
        let output_terms: Vec<&str> = defuzzifier
            .output()
            .terms()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        rule_base.validate_against(&fuzzifier, &output_terms)?;

        Ok(Self {
            fuzzifier,
            rule_base,
            defuzzifier,
            probability_variable: config.probability_variable,
        })
    }

    /// Builds the fixed heart-disease pipeline.
    #[must_use]
    pub fn heart_disease() -> Self {
        Self::from_config(PipelineConfig::heart_disease())
            .expect("default heart-disease configuration is valid")
    }

    /// The configured fuzzifier.
    #[must_use]
    pub fn fuzzifier(&self) -> &Fuzzifier {
        &self.fuzzifier
    }

    /// The configured rule base.
    #[must_use]
    pub fn rule_base(&self) -> &RuleBase {
        &self.rule_base
    }

    /// The configured defuzzifier.
    #[must_use]
    pub fn defuzzifier(&self) -> &Defuzzifier {
        &self.defuzzifier
    }

    /// Runs the full pipeline for one record.
    ///
    /// Invokes the predictor exactly once.
    ///
    /// # Errors
    ///
    /// [`CorazonError::PredictorUnavailable`] on predictor failure;
    /// [`CorazonError::UnknownField`] / [`CorazonError::Domain`] on a
    /// malformed record.
    pub fn infer(&self, record: &PatientRecord, predictor: &dyn Predictor) -> Result<CrispOutput> {
        let probability = bridge(record, predictor)?;
        self.infer_from_probability(record, probability)
    }

    /// Runs the pipeline with an already-obtained probability.
    ///
    /// Lets batch callers invoke the predictor once (possibly vectorized)
    /// and keep per-record inference pure.
    ///
    /// # Errors
    ///
    /// [`CorazonError::UnknownField`] / [`CorazonError::Domain`] on a
    /// malformed record.
    pub fn infer_from_probability(
        &self,
        record: &PatientRecord,
        probability: f32,
    ) -> Result<CrispOutput> {
        Ok(self.trace_from_probability(record, probability)?.output)
    }

    /// Like [`Self::infer`], returning every intermediate artifact.
    ///
    /// # Errors
    ///
    /// Same as [`Self::infer`].
    pub fn trace(&self, record: &PatientRecord, predictor: &dyn Predictor) -> Result<InferenceTrace> {
        let probability = bridge(record, predictor)?;
        self.trace_from_probability(record, probability)
    }

    fn trace_from_probability(
        &self,
        record: &PatientRecord,
        probability: f32,
    ) -> Result<InferenceTrace> {
        let mut extra = BTreeMap::new();
        extra.insert(self.probability_variable.clone(), probability);
        let memberships = self.fuzzifier.fuzzify(record, &extra)?;
        let firings = self.rule_base.evaluate(&memberships)?;
        let output = self.defuzzifier.defuzzify(&firings, self.rule_base.rules());
        Ok(InferenceTrace {
            probability,
            memberships,
            firings,
            output,
        })
    }
}


#[cfg(test)]
#[path = "tests_defuzz_contract.rs"]
mod tests_defuzz_contract;
