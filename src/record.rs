//! Patient records: immutable named clinical fields.
//!
//! A [`PatientRecord`] holds one patient's raw values (age, resting blood
//! pressure, serum cholesterol, ...) keyed by field name. Records are built
//! once per sample and never mutated; the fuzzifier reads from them.
//!
//! # Example
//!
//! ```
//! use corazon::record::PatientRecord;
//!
//! let record = PatientRecord::new()
//!     .with_numeric("age", 63.0)
//!     .with_numeric("chol", 233.0)
//!     .with_categorical("sex", "male");
//!
//! assert_eq!(record.numeric("age").unwrap(), 63.0);
//! assert!(record.numeric("sex").is_err());
//! ```

use crate::error::{CorazonError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One clinical field value: numeric or categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A numeric measurement (age, blood pressure, cholesterol, ...).
    Numeric(f32),
    /// A categorical code ("male", "typical angina", ...).
    Categorical(String),
}

/// An immutable mapping of named clinical fields to values.
///
/// Created once per evaluated sample. Lookups never mutate the record, so
/// records can be shared across threads by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl PatientRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a numeric field, consuming and returning the record.
    #[must_use]
    pub fn with_numeric(mut self, field: &str, value: f32) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::Numeric(value));
        self
    }

    /// Adds a categorical field, consuming and returning the record.
    #[must_use]
    pub fn with_categorical(mut self, field: &str, value: &str) -> Self {
        self.fields
            .insert(field.to_string(), FieldValue::Categorical(value.to_string()));
        self
    }

    /// Returns the raw value of a field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns the numeric value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`CorazonError::UnknownField`] if the field is absent and
    /// [`CorazonError::Domain`] if the field holds a categorical value.
    pub fn numeric(&self, field: &str) -> Result<f32> {
        match self.fields.get(field) {
            Some(FieldValue::Numeric(v)) => Ok(*v),
            Some(FieldValue::Categorical(s)) => Err(CorazonError::domain(
                field,
                &format!("categorical value \"{s}\" where numeric is required"),
            )),
            None => Err(CorazonError::unknown_field(field)),
        }
    }

    /// Returns the number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over (field name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
