//! Core traits defining the boundary to the external predictor.
//!
//! The predictor is trained elsewhere and treated as a black box: the crate
//! only ever calls [`Predictor::predict_probability`], so swapping the model
//! architecture never touches rule evaluation.

use crate::error::Result;
use crate::record::PatientRecord;

/// A separately-trained model that estimates disease probability.
///
/// Implementations must return a probability in [0, 1]. Failures are
/// reported as errors, never encoded as sentinel probabilities.
///
/// Predictors are shared by reference across worker threads during batch
/// evaluation, hence the `Send + Sync` bound.
///
/// # Examples
///
/// ```
/// use corazon::prelude::*;
///
/// struct Constant(f32);
///
/// impl Predictor for Constant {
///     fn predict_probability(&self, _record: &PatientRecord) -> Result<f32> {
///         Ok(self.0)
///     }
/// }
///
/// let model = Constant(0.8);
/// let record = PatientRecord::new().with_numeric("age", 63.0);
/// assert_eq!(model.predict_probability(&record).unwrap(), 0.8);
/// ```
pub trait Predictor: Send + Sync {
    /// Predicts the probability of disease for one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CorazonError::PredictorUnavailable`] (or any
    /// implementation error) if the model cannot produce a result.
    fn predict_probability(&self, record: &PatientRecord) -> Result<f32>;

    /// Predicts probabilities for a batch of records.
    ///
    /// The default implementation calls [`Self::predict_probability`] per
    /// record; vectorized models may override it. Results are positional:
    /// output `i` belongs to record `i`.
    ///
    /// # Errors
    ///
    /// Propagates the first per-record failure.
    fn predict_probabilities(&self, records: &[PatientRecord]) -> Result<Vec<f32>> {
        records
            .iter()
            .map(|record| self.predict_probability(record))
            .collect()
    }
}

/// Adapter implementing [`Predictor`] for a plain closure.
///
/// Useful for tests and for wrapping externally-hosted models.
///
/// # Examples
///
/// ```
/// use corazon::prelude::*;
/// use corazon::traits::FnPredictor;
///
/// let model = FnPredictor::new(|record: &PatientRecord| {
///     Ok(if record.numeric("age")? > 60.0 { 0.9 } else { 0.2 })
/// });
/// let senior = PatientRecord::new().with_numeric("age", 71.0);
/// assert_eq!(model.predict_probability(&senior).unwrap(), 0.9);
/// ```
pub struct FnPredictor<F>
where
    F: Fn(&PatientRecord) -> Result<f32> + Send + Sync,
{
    f: F,
}

impl<F> FnPredictor<F>
where
    F: Fn(&PatientRecord) -> Result<f32> + Send + Sync,
{
    /// Wraps a closure as a predictor.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&PatientRecord) -> Result<f32> + Send + Sync,
{
    fn predict_probability(&self, record: &PatientRecord) -> Result<f32> {
        (self.f)(record)
    }
}
