// =========================================================================
// FALSIFY-RB: rule firing contract (corazon rules)
//
// Min-conjunction invariants: a rule never fires more strongly than its
// weakest supporting condition, and raising any condition's membership
// never lowers the firing strength.
//
// References:
//   - Mamdani & Assilian (1975), min-AND inference
// =========================================================================

use super::*;

fn vector(age_senior: f32, chol_high: f32) -> MembershipVector {
    let mut mv = MembershipVector::new();
    mv.insert("age", "senior", age_senior);
    mv.insert("cholesterol", "high", chol_high);
    mv
}

fn two_condition_base() -> RuleBase {
    RuleBase::new(vec![Rule::if_all(&[
        ("age", "senior"),
        ("cholesterol", "high"),
    ])
    .then("high")])
}

/// FALSIFY-RB-001: firing strength never exceeds any contributing membership
#[test]
fn falsify_rb_001_strength_bounded_by_conditions() {
    let base = two_condition_base();
    for senior in [0.0_f32, 0.25, 0.5, 0.75, 1.0] {
        for high in [0.0_f32, 0.1, 0.6, 1.0] {
            let firings = base.evaluate(&vector(senior, high)).unwrap();
            let s = firings[0].strength;
            assert!(
                s <= senior && s <= high,
                "FALSIFIED RB-001: strength={s} exceeds senior={senior} or high={high}"
            );
        }
    }
}

/// FALSIFY-RB-002: firing strength is monotone in each condition
#[test]
fn falsify_rb_002_strength_monotone() {
    let base = two_condition_base();
    let grid = [0.0_f32, 0.2, 0.4, 0.6, 0.8, 1.0];
    for &high in &grid {
        let mut previous = 0.0_f32;
        for &senior in &grid {
            let s = base.evaluate(&vector(senior, high)).unwrap()[0].strength;
            assert!(
                s >= previous,
                "FALSIFIED RB-002: strength dropped from {previous} to {s} as senior rose to {senior}"
            );
            previous = s;
        }
    }
}

/// FALSIFY-RB-003: firing strength stays in [0, 1]
#[test]
fn falsify_rb_003_strength_in_unit_interval() {
    let base = two_condition_base();
    for senior in [0.0_f32, 0.5, 1.0] {
        for high in [0.0_f32, 0.5, 1.0] {
            let s = base.evaluate(&vector(senior, high)).unwrap()[0].strength;
            assert!(
                (0.0..=1.0).contains(&s),
                "FALSIFIED RB-003: strength={s} outside [0,1]"
            );
        }
    }
}

/// FALSIFY-RB-004: evaluation reports every rule, fired or not, in order
#[test]
fn falsify_rb_004_reports_all_rules_in_order() {
    let base = RuleBase::new(vec![
        Rule::if_all(&[("age", "senior")]).then("high"),
        Rule::if_all(&[("cholesterol", "high")]).then("high"),
        Rule::if_all(&[("age", "senior"), ("cholesterol", "high")]).then("high"),
    ]);
    let firings = base.evaluate(&vector(0.0, 0.0)).unwrap();
    assert_eq!(
        firings.len(),
        3,
        "FALSIFIED RB-004: {} firings for 3 rules",
        firings.len()
    );
    for (i, firing) in firings.iter().enumerate() {
        assert_eq!(
            firing.rule, i,
            "FALSIFIED RB-004: firing {i} labeled rule {}",
            firing.rule
        );
    }
}
