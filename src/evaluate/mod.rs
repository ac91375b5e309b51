//! Dataset evaluation: standalone predictor vs. hybrid pipeline.
//!
//! [`DatasetEvaluator`] runs the full per-record pipeline over a labeled
//! dataset and reports accuracy plus confusion counts for two systems: the
//! external predictor alone (thresholded at `nn_threshold`) and the hybrid
//! neuro-fuzzy pipeline.
//!
//! Per-record inference is pure and records are independent. Predictor
//! failures follow an explicit [`BatchErrorPolicy`]: abort the whole run
//! (default) or skip the affected record and report exactly how many were
//! evaluated. Malformed records (missing fields) receive a default negative
//! classification and are counted, so one bad row never invalidates the
//! batch.
//!
//! # Example
//!
//! ```
//! use corazon::prelude::*;
//! use corazon::traits::FnPredictor;
//!
//! let evaluator = DatasetEvaluator::new(HybridPipeline::heart_disease());
//! let records = vec![
//!     PatientRecord::new().with_numeric("age", 70.0).with_numeric("chol", 280.0),
//!     PatientRecord::new().with_numeric("age", 25.0).with_numeric("chol", 150.0),
//! ];
//! let labels = vec![1, 0];
//! let model = FnPredictor::new(|r: &PatientRecord| {
//!     Ok(if r.numeric("age")? > 60.0 { 0.9 } else { 0.05 })
//! });
//!
//! let report = evaluator.evaluate(&records, &labels, &model).unwrap();
//! assert_eq!(report.hybrid.accuracy, 1.0);
//! ```

use crate::bridge::{bridge, bridge_batch};
use crate::config::PipelineConfig;
use crate::error::{CorazonError, Result};
use crate::inference::HybridPipeline;
use crate::metrics::ConfusionMatrix;
use crate::record::PatientRecord;
use crate::traits::Predictor;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What to do when the predictor fails for a record mid-batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchErrorPolicy {
    /// Propagate the failure and invalidate the whole run.
    Abort,
    /// Exclude the record and report how many were evaluated.
    Skip,
}

/// Accuracy and confusion counts for one system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// Fraction of evaluated records classified correctly.
    pub accuracy: f32,
    /// Full binary confusion counts.
    pub confusion: ConfusionMatrix,
}

impl SystemMetrics {
    fn from_labels(y_pred: &[u8], y_true: &[u8]) -> Self {
        let confusion = ConfusionMatrix::from_labels(y_pred, y_true);
        Self {
            accuracy: confusion.accuracy(),
            confusion,
        }
    }
}

/// Result of one dataset evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Records supplied to the run.
    pub total_records: usize,
    /// Records that received a classification (includes defaulted ones).
    pub evaluated_records: usize,
    /// Malformed records classified with the default negative decision.
    pub defaulted_records: usize,
    /// Records excluded under [`BatchErrorPolicy::Skip`].
    pub skipped_records: usize,
    /// Standalone predictor metrics at the configured probability cutoff.
    pub predictor: SystemMetrics,
    /// Hybrid pipeline metrics at the configured score threshold.
    pub hybrid: SystemMetrics,
}

/// Per-record outcome, prior to tallying.
enum Outcome {
    Scored {
        nn: u8,
        hybrid: u8,
        label: u8,
        defaulted: bool,
    },
    Skipped,
    Failed(CorazonError),
}

/// Runs the hybrid pipeline over labeled datasets.
#[derive(Debug, Clone)]
pub struct DatasetEvaluator {
    pipeline: HybridPipeline,
    policy: BatchErrorPolicy,
    nn_threshold: f32,
}

impl DatasetEvaluator {
    /// Creates an evaluator with the abort policy and a 0.5 predictor cutoff.
    #[must_use]
    pub fn new(pipeline: HybridPipeline) -> Self {
        Self {
            pipeline,
            policy: BatchErrorPolicy::Abort,
            nn_threshold: 0.5,
        }
    }

    /// Builds pipeline and evaluator together from one configuration.
    ///
    /// # Errors
    ///
    /// Propagates configuration validation failures.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let nn_threshold = config.nn_threshold;
        Ok(Self {
            pipeline: HybridPipeline::from_config(config)?,
            policy: BatchErrorPolicy::Abort,
            nn_threshold,
        })
    }

    /// Sets the batch error policy.
    #[must_use]
    pub fn with_policy(mut self, policy: BatchErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the standalone predictor's probability cutoff.
    #[must_use]
    pub fn with_nn_threshold(mut self, nn_threshold: f32) -> Self {
        self.nn_threshold = nn_threshold;
        self
    }

    /// The underlying pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &HybridPipeline {
        &self.pipeline
    }

    /// Evaluates both systems over a labeled dataset.
    ///
    /// Under [`BatchErrorPolicy::Abort`] the predictor is invoked through
    /// its batched entry point (one call for vectorized models) and the
    /// first failure ends the run. Under [`BatchErrorPolicy::Skip`] records
    /// are scored independently in parallel and failed records are
    /// excluded; results stay attributable to their record index.
    ///
    /// # Errors
    ///
    /// Length mismatch or non-binary labels; predictor failure under
    /// `Abort`; any non-recoverable inference error.
    pub fn evaluate(
        &self,
        records: &[PatientRecord],
        labels: &[u8],
        predictor: &dyn Predictor,
    ) -> Result<EvaluationReport> {
        if records.len() != labels.len() {
            return Err(CorazonError::Other(format!(
                "records ({}) and labels ({}) must have the same length",
                records.len(),
                labels.len()
            )));
        }
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(CorazonError::Other(format!(
                "labels must be 0 or 1, found {bad}"
            )));
        }

        let outcomes = match self.policy {
            BatchErrorPolicy::Abort => self.evaluate_abort(records, labels, predictor)?,
            BatchErrorPolicy::Skip => self.evaluate_skip(records, labels, predictor),
        };

        let mut nn_preds = Vec::with_capacity(records.len());
        let mut hybrid_preds = Vec::with_capacity(records.len());
        let mut evaluated_labels = Vec::with_capacity(records.len());
        let mut defaulted_records = 0_usize;
        let mut skipped_records = 0_usize;
        for outcome in outcomes {
            match outcome {
                Outcome::Scored {
                    nn,
                    hybrid,
                    label,
                    defaulted,
                } => {
                    nn_preds.push(nn);
                    hybrid_preds.push(hybrid);
                    evaluated_labels.push(label);
                    if defaulted {
                        defaulted_records += 1;
                    }
                }
                Outcome::Skipped => skipped_records += 1,
                Outcome::Failed(e) => return Err(e),
            }
        }

        Ok(EvaluationReport {
            total_records: records.len(),
            evaluated_records: evaluated_labels.len(),
            defaulted_records,
            skipped_records,
            predictor: SystemMetrics::from_labels(&nn_preds, &evaluated_labels),
            hybrid: SystemMetrics::from_labels(&hybrid_preds, &evaluated_labels),
        })
    }

    /// Scores one record given its bridged probability.
    ///
    /// Malformed-record failures (missing field, categorical where numeric)
    /// fall back to the default negative classification; anything else is
    /// surfaced.
    fn score(&self, record: &PatientRecord, probability: f32, label: u8) -> Outcome {
        let nn = u8::from(probability >= self.nn_threshold);
        match self.pipeline.infer_from_probability(record, probability) {
            Ok(output) => Outcome::Scored {
                nn,
                hybrid: output.decision,
                label,
                defaulted: false,
            },
            Err(CorazonError::UnknownField { .. } | CorazonError::Domain { .. }) => {
                Outcome::Scored {
                    nn,
                    hybrid: 0,
                    label,
                    defaulted: true,
                }
            }
            Err(e) => Outcome::Failed(e),
        }
    }

    fn evaluate_abort(
        &self,
        records: &[PatientRecord],
        labels: &[u8],
        predictor: &dyn Predictor,
    ) -> Result<Vec<Outcome>> {
        let probabilities = bridge_batch(records, predictor)?;
        Ok(records
            .iter()
            .zip(labels)
            .zip(probabilities)
            .map(|((record, &label), probability)| self.score(record, probability, label))
            .collect())
    }

    fn evaluate_skip(
        &self,
        records: &[PatientRecord],
        labels: &[u8],
        predictor: &dyn Predictor,
    ) -> Vec<Outcome> {
        records
            .par_iter()
            .zip(labels.par_iter())
            .map(|(record, &label)| match bridge(record, predictor) {
                Ok(probability) => self.score(record, probability, label),
                Err(_) => Outcome::Skipped,
            })
            .collect()
    }
}
