//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use corazon::prelude::*;
//! ```

pub use crate::config::PipelineConfig;
pub use crate::error::{CorazonError, Result};
pub use crate::evaluate::{BatchErrorPolicy, DatasetEvaluator, EvaluationReport};
pub use crate::fuzzy::{Fuzzifier, LinguisticVariable, MembershipFunction, MembershipVector};
pub use crate::inference::{CrispOutput, Defuzzifier, HybridPipeline, InferenceTrace};
pub use crate::metrics::{accuracy, ConfusionMatrix};
pub use crate::record::{FieldValue, PatientRecord};
pub use crate::rules::{Rule, RuleBase, RuleFiring};
pub use crate::traits::Predictor;
