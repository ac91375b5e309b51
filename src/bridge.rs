//! Probability bridge: folds the external predictor into the fuzzy inputs.
//!
//! The bridge invokes the predictor exactly once per record and hands its
//! probability through unchanged, so the value can drive a dedicated
//! linguistic variable (the `nn_probability` input of the default
//! configuration). A predictor failure is always propagated: silently
//! substituting a probability would corrupt every downstream rule.

use crate::error::{CorazonError, Result};
use crate::record::PatientRecord;
use crate::traits::Predictor;

/// Obtains the predicted probability for one record.
///
/// The value is passed through without rescaling. A non-finite result is
/// treated as a predictor failure.
///
/// # Errors
///
/// [`CorazonError::PredictorUnavailable`] if the predictor fails or
/// returns NaN/infinity.
pub fn bridge(record: &PatientRecord, predictor: &dyn Predictor) -> Result<f32> {
    let probability = predictor.predict_probability(record)?;
    if probability.is_finite() {
        Ok(probability)
    } else {
        Err(CorazonError::predictor_unavailable(&format!(
            "predictor returned non-finite probability {probability}"
        )))
    }
}

/// Obtains predicted probabilities for a batch of records.
///
/// Delegates to [`Predictor::predict_probabilities`] so vectorized models
/// run one batched call; output `i` belongs to record `i`.
///
/// # Errors
///
/// [`CorazonError::PredictorUnavailable`] if the predictor fails or any
/// returned probability is non-finite.
pub fn bridge_batch(records: &[PatientRecord], predictor: &dyn Predictor) -> Result<Vec<f32>> {
    let probabilities = predictor.predict_probabilities(records)?;
    if probabilities.len() != records.len() {
        return Err(CorazonError::predictor_unavailable(&format!(
            "predictor returned {} probabilities for {} records",
            probabilities.len(),
            records.len()
        )));
    }
    for (i, p) in probabilities.iter().enumerate() {
        if !p.is_finite() {
            return Err(CorazonError::predictor_unavailable(&format!(
                "predictor returned non-finite probability {p} for record {i}"
            )));
        }
    }
    Ok(probabilities)
}
