// =========================================================================
// FALSIFY-DF: defuzzification contract (corazon inference)
//
// The crisp score must stay inside the output variable's domain for every
// firing pattern, the all-zero aggregate must hit the documented midpoint
// default, and raising the bridged probability must never lower the score
// under the risk-increasing default rule set.
//
// References:
//   - Mamdani & Assilian (1975), max-min composition + centroid
// =========================================================================

use super::*;
use crate::traits::FnPredictor;

fn heart_record() -> PatientRecord {
    PatientRecord::new()
        .with_numeric("age", 58.0)
        .with_numeric("chol", 245.0)
}

/// FALSIFY-DF-001: score within domain bounds for a grid of firing patterns
#[test]
fn falsify_df_001_score_within_bounds() {
    let pipeline = HybridPipeline::heart_disease();
    let (lo, hi) = pipeline.defuzzifier().output().domain();
    for age in [20.0_f32, 35.0, 50.0, 65.0, 80.0] {
        for chol in [100.0_f32, 200.0, 300.0, 400.0] {
            for p in [0.0_f32, 0.25, 0.5, 0.75, 1.0] {
                let record = PatientRecord::new()
                    .with_numeric("age", age)
                    .with_numeric("chol", chol);
                let out = pipeline.infer_from_probability(&record, p).unwrap();
                assert!(
                    out.score >= lo && out.score <= hi,
                    "FALSIFIED DF-001: score={} outside [{lo}, {hi}] for age={age} chol={chol} p={p}",
                    out.score
                );
            }
        }
    }
}

/// FALSIFY-DF-002: all-zero aggregate returns the domain midpoint
#[test]
fn falsify_df_002_zero_aggregate_midpoint() {
    let output = LinguisticVariable::new("risk", 0.0, 100.0)
        .with_term("low", crate::fuzzy::MembershipFunction::triangular(0.0, 25.0, 50.0))
        .with_term("high", crate::fuzzy::MembershipFunction::triangular(50.0, 75.0, 100.0));
    let defuzz = Defuzzifier::new(output);
    let rules = vec![
        Rule::if_all(&[("a", "x")]).then("low"),
        Rule::if_all(&[("a", "y")]).then("high"),
    ];
    let firings = vec![
        RuleFiring { rule: 0, strength: 0.0 },
        RuleFiring { rule: 1, strength: 0.0 },
    ];
    let out = defuzz.defuzzify(&firings, &rules);
    assert_eq!(
        out.score, 50.0,
        "FALSIFIED DF-002: neutral default {} is not the midpoint",
        out.score
    );
}

/// FALSIFY-DF-003: score is monotone in the bridged probability
///
/// Holds whenever only risk-increasing rules respond to the probability.
/// Cholesterol is pinned to the domain edge so the medium-risk rule stays
/// silent; that rule peaks at mid probability and is deliberately not
/// monotone.
#[test]
fn falsify_df_003_score_monotone_in_probability() {
    let pipeline = HybridPipeline::heart_disease();
    let record = PatientRecord::new()
        .with_numeric("age", 58.0)
        .with_numeric("chol", 400.0);
    let mut previous = f32::MIN;
    let mut p = 0.0_f32;
    while p <= 1.0 {
        let score = pipeline.infer_from_probability(&record, p).unwrap().score;
        assert!(
            score >= previous - 1e-4,
            "FALSIFIED DF-003: score dropped from {previous} to {score} at p={p}"
        );
        previous = score;
        p += 0.02;
    }
}

/// FALSIFY-DF-004: inference is idempotent (no hidden state)
#[test]
fn falsify_df_004_idempotent() {
    let pipeline = HybridPipeline::heart_disease();
    let record = heart_record();
    let model = FnPredictor::new(|_: &PatientRecord| Ok(0.62));
    let first = pipeline.infer(&record, &model).unwrap();
    for _ in 0..10 {
        let again = pipeline.infer(&record, &model).unwrap();
        assert_eq!(
            first, again,
            "FALSIFIED DF-004: repeated inference diverged"
        );
    }
}

/// FALSIFY-DF-005: decision flips exactly at the threshold
#[test]
fn falsify_df_005_decision_threshold_inclusive() {
    let pipeline = HybridPipeline::heart_disease();
    let threshold = pipeline.defuzzifier().threshold();
    let record = heart_record();
    for p in [0.0_f32, 0.3, 0.6, 0.9] {
        let out = pipeline.infer_from_probability(&record, p).unwrap();
        assert_eq!(
            out.decision,
            u8::from(out.score >= threshold),
            "FALSIFIED DF-005: decision {} disagrees with score {} vs threshold {threshold}",
            out.decision,
            out.score
        );
    }
}

/// FALSIFY-DF-006: regression pin on default-configuration scores
///
/// Guards the fixed rule base against drift: these scores were computed
/// from the shipped heart-disease configuration and must stay put until
/// the configuration itself changes.
#[test]
fn falsify_df_006_default_config_regression_pin() {
    let pipeline = HybridPipeline::heart_disease();

    let high = PatientRecord::new()
        .with_numeric("age", 70.0)
        .with_numeric("chol", 280.0);
    let out = pipeline.infer_from_probability(&high, 0.9).unwrap();
    assert!(
        out.score > 65.0 && out.decision == 1,
        "FALSIFIED DF-006: high-risk score {} decision {}",
        out.score,
        out.decision
    );

    let low = PatientRecord::new()
        .with_numeric("age", 25.0)
        .with_numeric("chol", 150.0);
    let out = pipeline.infer_from_probability(&low, 0.05).unwrap();
    assert!(
        out.score < 40.0 && out.decision == 0,
        "FALSIFIED DF-006: low-risk score {} decision {}",
        out.score,
        out.decision
    );
}
