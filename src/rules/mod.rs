//! Rule base: fixed IF-THEN rules over linguistic variables.
//!
//! Rules are plain immutable data: an antecedent (conjunction of
//! (variable, term) conditions combined via minimum) and a consequent
//! output term with a weight. The [`RuleBase`] evaluates all rules against
//! one [`MembershipVector`] and reports a firing strength per rule,
//! including strengths of zero for interpretability.
//!
//! Disjunctive antecedents are expressed as separate rules sharing a
//! consequent; maximum-aggregation downstream reproduces the fuzzy OR.
//!
//! # Example
//!
//! ```
//! use corazon::rules::Rule;
//!
//! let rule = Rule::if_all(&[("age", "senior"), ("cholesterol", "high")])
//!     .then("high")
//!     .with_weight(0.9);
//! assert_eq!(rule.antecedent.len(), 2);
//! ```

use crate::error::{CorazonError, Result};
use crate::fuzzy::{Fuzzifier, MembershipVector};
use serde::{Deserialize, Serialize};

/// One antecedent condition: variable `variable` is term `term`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Linguistic variable name.
    pub variable: String,
    /// Term name within that variable.
    pub term: String,
}

/// An IF-antecedent-THEN-consequent rule.
///
/// The antecedent is a conjunction (fuzzy AND via minimum). The consequent
/// names a term of the output variable; `weight` scales the rule's vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Conjunction of conditions, combined via minimum.
    pub antecedent: Vec<Condition>,
    /// Output term this rule votes for.
    pub consequent: String,
    /// Vote weight / certainty in [0, 1].
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

/// Builder intermediate: antecedent declared, consequent pending.
#[derive(Debug, Clone)]
pub struct RuleAntecedent {
    conditions: Vec<Condition>,
}

impl Rule {
    /// Starts a rule from (variable, term) antecedent pairs.
    #[must_use]
    pub fn if_all(pairs: &[(&str, &str)]) -> RuleAntecedent {
        RuleAntecedent {
            conditions: pairs
                .iter()
                .map(|(variable, term)| Condition {
                    variable: (*variable).to_string(),
                    term: (*term).to_string(),
                })
                .collect(),
        }
    }
}

impl RuleAntecedent {
    /// Completes the rule with an output term (weight 1.0).
    #[must_use]
    pub fn then(self, consequent: &str) -> Rule {
        Rule {
            antecedent: self.conditions,
            consequent: consequent.to_string(),
            weight: 1.0,
        }
    }
}

impl Rule {
    /// Sets the rule weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// Firing strength of one rule for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleFiring {
    /// Index into [`RuleBase::rules`].
    pub rule: usize,
    /// Degree to which the antecedent is satisfied, in [0, 1].
    pub strength: f32,
}

/// The fixed rule set, evaluated independently per record.
///
/// Immutable after construction; rules never mutate each other and
/// evaluation order does not affect the aggregated result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Creates a rule base from a fixed rule list.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The declared rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluates every rule against one membership vector.
    ///
    /// Firing strength is the minimum of the antecedent condition degrees.
    /// Zero-strength rules are still reported so callers can inspect which
    /// rules stayed silent.
    ///
    /// # Errors
    ///
    /// [`CorazonError::UnknownTerm`] if a condition references a
    /// (variable, term) pair missing from the membership vector. This is
    /// normally prevented by [`RuleBase::validate_against`] at construction.
    pub fn evaluate(&self, memberships: &MembershipVector) -> Result<Vec<RuleFiring>> {
        let mut firings = Vec::with_capacity(self.rules.len());
        for (index, rule) in self.rules.iter().enumerate() {
            let mut strength = 1.0_f32;
            for condition in &rule.antecedent {
                let degree = memberships
                    .get(&condition.variable, &condition.term)
                    .ok_or_else(|| CorazonError::UnknownTerm {
                        variable: condition.variable.clone(),
                        term: condition.term.clone(),
                    })?;
                strength = strength.min(degree);
            }
            firings.push(RuleFiring {
                rule: index,
                strength,
            });
        }
        Ok(firings)
    }

    /// Validates rule references against a fuzzifier's declared variables
    /// and the output variable's terms.
    ///
    /// # Errors
    ///
    /// [`CorazonError::InvalidConfig`] for an empty rule set, an empty
    /// antecedent, or a weight outside [0, 1];
    /// [`CorazonError::UnknownTerm`] for a dangling (variable, term)
    /// reference.
    pub fn validate_against(&self, fuzzifier: &Fuzzifier, output_terms: &[&str]) -> Result<()> {
        if self.rules.is_empty() {
            return Err(CorazonError::invalid_config("rule base declares no rules"));
        }
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.antecedent.is_empty() {
                return Err(CorazonError::invalid_config(&format!(
                    "rule {index} has an empty antecedent"
                )));
            }
            if !(0.0..=1.0).contains(&rule.weight) {
                return Err(CorazonError::invalid_config(&format!(
                    "rule {index} weight {} outside [0, 1]",
                    rule.weight
                )));
            }
            for condition in &rule.antecedent {
                let known = fuzzifier
                    .variable(&condition.variable)
                    .is_some_and(|v| v.term(&condition.term).is_some());
                if !known {
                    return Err(CorazonError::UnknownTerm {
                        variable: condition.variable.clone(),
                        term: condition.term.clone(),
                    });
                }
            }
            if !output_terms.contains(&rule.consequent.as_str()) {
                return Err(CorazonError::UnknownTerm {
                    variable: "output".to_string(),
                    term: rule.consequent.clone(),
                });
            }
        }
        Ok(())
    }
}


#[cfg(test)]
#[path = "tests_firing_contract.rs"]
mod tests_firing_contract;
