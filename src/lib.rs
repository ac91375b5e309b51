//! Corazon: hybrid neuro-fuzzy heart-disease risk classification in pure Rust.
//!
//! Corazon combines a separately-trained probabilistic predictor with an
//! interpretable fuzzy rule base. The predictor's probability is bridged in
//! as one more linguistic input, the fixed rule set is evaluated with
//! max-min (Mamdani) inference, and centroid defuzzification plus a
//! threshold yields the binary diagnosis.
//!
//! # Quick Start
//!
//! ```
//! use corazon::prelude::*;
//! use corazon::traits::FnPredictor;
//!
//! // The fixed heart-disease pipeline: age, cholesterol, and the bridged
//! // predictor probability vote on a 0-100 risk score.
//! let pipeline = HybridPipeline::heart_disease();
//!
//! let record = PatientRecord::new()
//!     .with_numeric("age", 70.0)
//!     .with_numeric("chol", 280.0);
//!
//! // Any trained model goes behind the Predictor trait.
//! let model = FnPredictor::new(|_: &PatientRecord| Ok(0.9));
//!
//! let output = pipeline.infer(&record, &model).unwrap();
//! assert!(output.score > 50.0);
//! assert_eq!(output.decision, 1);
//! ```
//!
//! # Modules
//!
//! - [`record`]: Immutable patient records with named clinical fields
//! - [`fuzzy`]: Linguistic variables, membership functions, fuzzification
//! - [`bridge`]: Folding the external predictor into the fuzzy inputs
//! - [`rules`]: The fixed IF-THEN rule base with min-AND evaluation
//! - [`inference`]: Aggregation, centroid defuzzification, the hybrid pipeline
//! - [`config`]: Declarative pipeline configuration (JSON-loadable)
//! - [`metrics`]: Binary accuracy and confusion counts
//! - [`evaluate`]: Dataset evaluation of predictor vs. hybrid pipeline
//! - [`traits`]: The `Predictor` boundary to the external model

pub mod bridge;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod fuzzy;
pub mod inference;
pub mod metrics;
pub mod prelude;
pub mod record;
pub mod rules;
pub mod traits;
