//! Fuzzification: linguistic variables and membership evaluation.
//!
//! A [`LinguisticVariable`] maps a raw clinical value onto qualitative terms
//! ("young"/"middle"/"senior") through triangular or trapezoidal membership
//! functions. The [`Fuzzifier`] evaluates every configured variable for one
//! [`PatientRecord`], producing a [`MembershipVector`] of degrees in [0, 1].
//!
//! Out-of-domain values are clamped to the nearest domain boundary rather
//! than rejected, so fuzzification is total over finite numeric inputs;
//! non-finite values are rejected as domain errors.
//!
//! # Example
//!
//! ```
//! use corazon::fuzzy::LinguisticVariable;
//!
//! let age = LinguisticVariable::new("age", 20.0, 80.0)
//!     .with_auto_terms(&["young", "middle", "senior"]);
//!
//! let degrees = age.fuzzify(70.0);
//! let senior = degrees.iter().find(|(t, _)| t == "senior").unwrap().1;
//! assert!(senior > 0.6);
//! ```

use crate::error::{CorazonError, Result};
use crate::record::PatientRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A membership function mapping a raw value to a degree in [0, 1].
///
/// Shouldered shapes are expressed by collapsing an edge: a triangle with
/// `a == b` has a vertical left edge and acts as a left shoulder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum MembershipFunction {
    /// Triangle with feet `a`, `c` and peak `b` (`a <= b <= c`).
    Triangular {
        /// Left foot
        a: f32,
        /// Peak
        b: f32,
        /// Right foot
        c: f32,
    },
    /// Trapezoid with feet `a`, `d` and plateau `[b, c]` (`a <= b <= c <= d`).
    Trapezoidal {
        /// Left foot
        a: f32,
        /// Plateau start
        b: f32,
        /// Plateau end
        c: f32,
        /// Right foot
        d: f32,
    },
}

impl MembershipFunction {
    /// Creates a triangular membership function.
    #[must_use]
    pub fn triangular(a: f32, b: f32, c: f32) -> Self {
        Self::Triangular { a, b, c }
    }

    /// Creates a trapezoidal membership function.
    #[must_use]
    pub fn trapezoidal(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self::Trapezoidal { a, b, c, d }
    }

    /// Evaluates the membership degree at `x`.
    ///
    /// Always returns a value in [0, 1]; zero outside the support.
    #[must_use]
    pub fn degree(&self, x: f32) -> f32 {
        match *self {
            Self::Triangular { a, b, c } => {
                if x < a || x > c {
                    return 0.0;
                }
                let rise = if x <= b && b > a { (x - a) / (b - a) } else { 1.0 };
                let fall = if x >= b && c > b { (c - x) / (c - b) } else { 1.0 };
                rise.min(fall).clamp(0.0, 1.0)
            }
            Self::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    return 0.0;
                }
                let rise = if x <= b && b > a { (x - a) / (b - a) } else { 1.0 };
                let fall = if x >= c && d > c { (d - x) / (d - c) } else { 1.0 };
                rise.min(fall).clamp(0.0, 1.0)
            }
        }
    }

    /// Validates breakpoint ordering.
    pub(crate) fn validate(&self) -> Result<()> {
        let ordered = match *self {
            Self::Triangular { a, b, c } => a <= b && b <= c,
            Self::Trapezoidal { a, b, c, d } => a <= b && b <= c && c <= d,
        };
        if ordered {
            Ok(())
        } else {
            Err(CorazonError::invalid_config(&format!(
                "membership function breakpoints out of order: {self:?}"
            )))
        }
    }
}

/// One qualitative term of a linguistic variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticTerm {
    /// Term name, e.g. "senior".
    pub name: String,
    /// Membership function for this term.
    pub membership: MembershipFunction,
}

/// A named input or output dimension with an ordered set of terms.
///
/// Immutable after construction; shared by reference across records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    /// Record field this variable reads from; defaults to the variable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    domain: (f32, f32),
    terms: Vec<LinguisticTerm>,
}

impl LinguisticVariable {
    /// Creates a variable over the closed domain `[lo, hi]` with no terms.
    #[must_use]
    pub fn new(name: &str, lo: f32, hi: f32) -> Self {
        Self {
            name: name.to_string(),
            field: None,
            domain: (lo, hi),
            terms: Vec::new(),
        }
    }

    /// Adds a term with an explicit membership function.
    #[must_use]
    pub fn with_term(mut self, name: &str, membership: MembershipFunction) -> Self {
        self.terms.push(LinguisticTerm {
            name: name.to_string(),
            membership,
        });
        self
    }

    /// Adds evenly-spaced triangular terms spanning the domain.
    ///
    /// The first and last terms peak at the domain boundaries (shouldered),
    /// interior terms peak at evenly-spaced centers. With three names this
    /// reproduces the classic low/medium/high partition.
    #[must_use]
    pub fn with_auto_terms(mut self, names: &[&str]) -> Self {
        let (lo, hi) = self.domain;
        let n = names.len();
        if n == 1 {
            return self.with_term(names[0], MembershipFunction::trapezoidal(lo, lo, hi, hi));
        }
        let width = (hi - lo) / (n as f32 - 1.0);
        for (i, name) in names.iter().enumerate() {
            let center = lo + width * i as f32;
            let a = (center - width).max(lo);
            let c = (center + width).min(hi);
            self = self.with_term(name, MembershipFunction::triangular(a, center, c));
        }
        self
    }

    /// Maps this variable to a differently-named record field.
    #[must_use]
    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record field this variable reads from.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.name)
    }

    /// Domain bounds `(lo, hi)`.
    #[must_use]
    pub fn domain(&self) -> (f32, f32) {
        self.domain
    }

    /// Declared terms, in order.
    #[must_use]
    pub fn terms(&self) -> &[LinguisticTerm] {
        &self.terms
    }

    /// Looks up a term by name.
    #[must_use]
    pub fn term(&self, name: &str) -> Option<&LinguisticTerm> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Clamps a raw value into the variable's domain.
    #[must_use]
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.domain.0, self.domain.1)
    }

    /// Evaluates every term at `raw` (clamped into the domain).
    ///
    /// Returns (term name, degree) pairs in declaration order.
    #[must_use]
    pub fn fuzzify(&self, raw: f32) -> Vec<(String, f32)> {
        let x = self.clamp(raw);
        self.terms
            .iter()
            .map(|t| (t.name.clone(), t.membership.degree(x)))
            .collect()
    }

    /// Validates domain ordering and term membership functions.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.domain.0 >= self.domain.1 {
            return Err(CorazonError::invalid_config(&format!(
                "variable {} has empty domain [{}, {}]",
                self.name, self.domain.0, self.domain.1
            )));
        }
        if self.terms.is_empty() {
            return Err(CorazonError::invalid_config(&format!(
                "variable {} declares no terms",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        for term in &self.terms {
            if !seen.insert(term.name.as_str()) {
                return Err(CorazonError::invalid_config(&format!(
                    "variable {} declares term {} twice",
                    self.name, term.name
                )));
            }
            term.membership.validate()?;
        }
        Ok(())
    }
}

/// Per-record membership degrees, keyed by (variable, term).
///
/// Derived, recomputed per record, and discarded after inference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MembershipVector {
    degrees: BTreeMap<(String, String), f32>,
}

impl MembershipVector {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the degree for (variable, term).
    pub fn insert(&mut self, variable: &str, term: &str, degree: f32) {
        self.degrees
            .insert((variable.to_string(), term.to_string()), degree);
    }

    /// Returns the degree for (variable, term), if evaluated.
    #[must_use]
    pub fn get(&self, variable: &str, term: &str) -> Option<f32> {
        self.degrees
            .get(&(variable.to_string(), term.to_string()))
            .copied()
    }

    /// Number of (variable, term) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Returns true if no degrees were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Iterates over ((variable, term), degree) entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f32)> {
        self.degrees
            .iter()
            .map(|((v, t), d)| (v.as_str(), t.as_str(), *d))
    }
}

/// Evaluates all configured linguistic variables for one record.
///
/// Variables marked external skip record lookup and read their value from
/// the `extra_inputs` map instead; this is how the bridged predictor
/// probability enters the rule base.
///
/// Fuzzification is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct Fuzzifier {
    variables: Vec<LinguisticVariable>,
    external: BTreeSet<String>,
}

impl Fuzzifier {
    /// Creates a fuzzifier with no variables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            external: BTreeSet::new(),
        }
    }

    /// Adds a record-sourced variable.
    #[must_use]
    pub fn with_variable(mut self, variable: LinguisticVariable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Adds a variable sourced from `extra_inputs` instead of the record.
    #[must_use]
    pub fn with_external_variable(mut self, variable: LinguisticVariable) -> Self {
        self.external.insert(variable.name().to_string());
        self.variables.push(variable);
        self
    }

    /// Configured variables, in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[LinguisticVariable] {
        &self.variables
    }

    /// Looks up a configured variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Returns true if the named variable is sourced from `extra_inputs`.
    #[must_use]
    pub fn is_external(&self, name: &str) -> bool {
        self.external.contains(name)
    }

    /// Fuzzifies one record plus externally-supplied inputs.
    ///
    /// Every configured variable contributes one degree per term. Values are
    /// clamped into each variable's domain before evaluation.
    ///
    /// # Errors
    ///
    /// [`CorazonError::UnknownField`] if a required record field (or external
    /// input) is absent; [`CorazonError::Domain`] if a record field holds a
    /// categorical value where a numeric one is required, or a non-finite
    /// numeric value (NaN comparisons would make every membership degree 1).
    pub fn fuzzify(
        &self,
        record: &PatientRecord,
        extra_inputs: &BTreeMap<String, f32>,
    ) -> Result<MembershipVector> {
        let mut memberships = MembershipVector::new();
        for variable in &self.variables {
            let raw = if self.external.contains(variable.name()) {
                *extra_inputs
                    .get(variable.name())
                    .ok_or_else(|| CorazonError::unknown_field(variable.name()))?
            } else {
                record.numeric(variable.field())?
            };
            if !raw.is_finite() {
                return Err(CorazonError::domain(
                    variable.name(),
                    &format!("non-finite value {raw} cannot be fuzzified"),
                ));
            }
            for (term, degree) in variable.fuzzify(raw) {
                memberships.insert(variable.name(), &term, degree);
            }
        }
        Ok(memberships)
    }

    /// Validates every configured variable.
    pub(crate) fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.name()) {
                return Err(CorazonError::invalid_config(&format!(
                    "variable {} declared twice",
                    variable.name()
                )));
            }
            variable.validate()?;
        }
        Ok(())
    }
}

impl Default for Fuzzifier {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
#[path = "tests_membership_contract.rs"]
mod tests_membership_contract;
