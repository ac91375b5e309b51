// =========================================================================
// FALSIFY-MF: membership function contract (corazon fuzzy)
//
// Every membership degree must lie in [0, 1] for every input, including
// values outside the function's support and outside the variable domain.
//
// References:
//   - Zadeh (1965) "Fuzzy Sets"
//   - Mamdani & Assilian (1975) "An Experiment in Linguistic Synthesis
//     with a Fuzzy Logic Controller"
// =========================================================================

use super::*;

/// FALSIFY-MF-001: triangular degree stays in [0, 1] across its support
#[test]
fn falsify_mf_001_triangular_degree_bounded() {
    let mf = MembershipFunction::triangular(10.0, 40.0, 90.0);
    let mut x = -50.0;
    while x <= 150.0 {
        let d = mf.degree(x);
        assert!(
            (0.0..=1.0).contains(&d),
            "FALSIFIED MF-001: degree({x})={d}, expected [0,1]"
        );
        x += 0.5;
    }
}

/// FALSIFY-MF-002: trapezoidal degree stays in [0, 1] across its support
#[test]
fn falsify_mf_002_trapezoidal_degree_bounded() {
    let mf = MembershipFunction::trapezoidal(0.0, 20.0, 60.0, 100.0);
    let mut x = -50.0;
    while x <= 150.0 {
        let d = mf.degree(x);
        assert!(
            (0.0..=1.0).contains(&d),
            "FALSIFIED MF-002: degree({x})={d}, expected [0,1]"
        );
        x += 0.5;
    }
}

/// FALSIFY-MF-003: degenerate triangle (a == b == c) never divides by zero
#[test]
fn falsify_mf_003_degenerate_triangle_total() {
    let mf = MembershipFunction::triangular(5.0, 5.0, 5.0);
    assert_eq!(mf.degree(5.0), 1.0, "FALSIFIED MF-003: spike peak not 1");
    assert_eq!(mf.degree(4.9), 0.0, "FALSIFIED MF-003: left of spike not 0");
    assert_eq!(mf.degree(5.1), 0.0, "FALSIFIED MF-003: right of spike not 0");
}

/// FALSIFY-MF-004: auto-term partition covers the whole domain
///
/// At every point of the domain at least one term must have positive
/// membership, otherwise a record value could fire no rule for a
/// reason other than the rule base itself.
#[test]
fn falsify_mf_004_auto_terms_cover_domain() {
    let chol = LinguisticVariable::new("cholesterol", 100.0, 400.0)
        .with_auto_terms(&["low", "normal", "high"]);
    let mut x = 100.0;
    while x <= 400.0 {
        let total: f32 = chol.fuzzify(x).iter().map(|(_, d)| d).sum();
        assert!(
            total > 0.0,
            "FALSIFIED MF-004: no term covers cholesterol={x}"
        );
        x += 1.0;
    }
}

/// FALSIFY-MF-005: clamping makes fuzzification total over numerics
#[test]
fn falsify_mf_005_clamp_matches_boundary() {
    let age = LinguisticVariable::new("age", 20.0, 80.0)
        .with_auto_terms(&["young", "middle", "senior"]);
    for (wild, boundary) in [(1e9_f32, 80.0_f32), (-1e9, 20.0), (f32::MAX, 80.0)] {
        assert_eq!(
            age.fuzzify(wild),
            age.fuzzify(boundary),
            "FALSIFIED MF-005: out-of-domain {wild} not clamped to {boundary}"
        );
    }
}

/// FALSIFY-MF-006: membership vector reports exactly variables × terms entries
#[test]
fn falsify_mf_006_vector_entry_count() {
    let fuzzifier = Fuzzifier::new()
        .with_variable(
            LinguisticVariable::new("age", 20.0, 80.0)
                .with_auto_terms(&["young", "middle", "senior"]),
        )
        .with_variable(
            LinguisticVariable::new("cholesterol", 100.0, 400.0)
                .with_field("chol")
                .with_auto_terms(&["low", "normal", "high"]),
        );
    let record = PatientRecord::new()
        .with_numeric("age", 54.0)
        .with_numeric("chol", 239.0);
    let mv = fuzzifier.fuzzify(&record, &BTreeMap::new()).unwrap();
    assert_eq!(
        mv.len(),
        6,
        "FALSIFIED MF-006: entries={}, expected 6",
        mv.len()
    );
}
