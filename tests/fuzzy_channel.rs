use std::sync::Arc;

use fuzzaction::context::Context;
use fuzzaction::fuzzy::{
    CrispMembership, Defuzzification, FuzzyChannel, FuzzyValue, MaximumDefuzzification,
    Membership, ThresholdMembership,
};
use fuzzaction::types::TypeRegistry;

#[test]
fn crisp_success_and_fail_are_singletons() {
    let success: Vec<FuzzyValue> = CrispMembership.success().collect();
    let fail: Vec<FuzzyValue> = CrispMembership.fail().collect();
    assert_eq!(success, vec![FuzzyValue::new(true, 1.0)]);
    assert_eq!(fail, vec![FuzzyValue::new(false, 1.0)]);
}

#[test]
fn degrees_are_clamped() {
    assert_eq!(FuzzyValue::new(true, 1.7).degree(), 1.0);
    assert_eq!(FuzzyValue::new(true, -0.2).degree(), 0.0);
    assert_eq!(FuzzyValue::new(true, f64::NAN).degree(), 0.0);
}

#[test]
fn empty_channel_is_a_structural_success() {
    assert_eq!(FuzzyChannel::empty().count(), 0);
    assert!(MaximumDefuzzification.defuzzify(FuzzyChannel::empty()));
}

#[test]
fn maximum_degree_decides() {
    let channel = FuzzyChannel::from_values(vec![
        FuzzyValue::new(true, 0.8),
        FuzzyValue::new(false, 0.1),
    ]);
    assert!(MaximumDefuzzification.defuzzify(channel));
    let channel = FuzzyChannel::from_values(vec![
        FuzzyValue::new(true, 0.2),
        FuzzyValue::new(false, 0.8),
    ]);
    assert!(!MaximumDefuzzification.defuzzify(channel));
    // ties must all hold
    let channel = FuzzyChannel::from_values(vec![
        FuzzyValue::new(true, 1.0),
        FuzzyValue::new(false, 1.0),
    ]);
    assert!(!MaximumDefuzzification.defuzzify(channel));
}

#[test]
fn lazy_channels_compute_on_read() {
    let channel = FuzzyChannel::lazy((0..3).map(|i| FuzzyValue::new(i % 2 == 0, 0.5)));
    let values: Vec<bool> = channel.map(|v| v.value()).collect();
    assert_eq!(values, vec![true, false, true]);
}

#[test]
fn verdict_follows_the_context_membership() {
    let context = Context::new(
        "graded",
        Arc::new(ThresholdMembership::new(0.7, 0.4)),
        Arc::new(MaximumDefuzzification),
        Arc::new(TypeRegistry::with_builtin_types()),
    );
    let success: Vec<FuzzyValue> = context.verdict(true).collect();
    assert_eq!(success, vec![FuzzyValue::new(true, 0.7)]);
    let fail: Vec<FuzzyValue> = context.verdict(false).collect();
    assert_eq!(fail, vec![FuzzyValue::new(false, 0.4)]);
    assert!(!context.defuzzify(context.fail()));
    assert_eq!(fail[0].term().as_bool(), Some(false));
}
