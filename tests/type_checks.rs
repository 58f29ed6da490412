use std::sync::Arc;

use fuzzaction::action::Action;
use fuzzaction::context::Context;
use fuzzaction::fuzzy::{CrispMembership, MaximumDefuzzification};
use fuzzaction::generic::{Check, Is, TypeName};
use fuzzaction::term::{Term, Value};
use fuzzaction::types::{TypeDescriptor, TypeRegistry};

fn holds(action: &dyn Action, arguments: &[Term]) -> bool {
    let context = Context::empty();
    let verdict = action
        .execute(false, &context, arguments, &mut Vec::new())
        .expect("check ok");
    context.defuzzify(verdict)
}

#[test]
fn is_requires_every_value_to_match() {
    let is = Is::new();
    assert!(holds(&is, &[Term::from("number"), Term::from(123), Term::from(44.5)]));
    assert!(!holds(&is, &[Term::from("string"), Term::from("x"), Term::from(1)]));
    assert!(!holds(
        &is,
        &[Term::from("string"), Term::from("text foo"), Term::from(123), Term::from(88.98)]
    ));
}

#[test]
fn host_type_names_can_be_registered_as_aliases() {
    let registry = TypeRegistry::with_builtin_types();
    for (alias, builtin) in [("java.lang.Number", "number"), ("java.lang.String", "string")] {
        let descriptor = registry.resolve(builtin).expect("builtin");
        registry.register(TypeDescriptor::new(alias, move |v| descriptor.accepts(v)));
    }
    let context = Context::new(
        "aliased plan",
        Arc::new(CrispMembership),
        Arc::new(MaximumDefuzzification),
        Arc::new(registry),
    );
    let is = |arguments: &[Term]| {
        let verdict = Is::new()
            .execute(false, &context, arguments, &mut Vec::new())
            .expect("check ok");
        context.defuzzify(verdict)
    };
    assert!(is(&[Term::from("java.lang.Number"), Term::from(123), Term::from(44.5)]));
    assert!(!is(&[Term::from("java.lang.String"), Term::from("x"), Term::from(1)]));
}

#[test]
fn is_reports_exactly_one_verdict() {
    let context = Context::empty();
    let verdict = Is::new()
        .execute(
            false,
            &context,
            &[Term::from("boolean"), Term::from(true), Term::from(false)],
            &mut Vec::new(),
        )
        .expect("check ok");
    assert_eq!(verdict.count(), 1);
}

#[test]
fn unknown_type_names_are_illegal_arguments() {
    let err = Is::new()
        .execute(
            false,
            &Context::empty(),
            &[Term::from("java.lang.Number"), Term::from(1)],
            &mut Vec::new(),
        )
        .unwrap_err();
    assert!(err.is_illegal_argument());
    assert_eq!(err.offending_value(), Some("java.lang.Number"));
}

#[test]
fn is_needs_a_type_and_a_value() {
    let is = Is::new();
    assert_eq!(is.minimal_argument_number(), 2);
    let err = is
        .execute(false, &Context::empty(), &[Term::from("number")], &mut Vec::new())
        .unwrap_err();
    assert!(err.is_illegal_argument());
    // a list flattening to nothing leaves no value to test
    let err = is
        .execute(
            false,
            &Context::empty(),
            &[Term::from("number"), Term::from(Vec::<Term>::new())],
            &mut Vec::new(),
        )
        .unwrap_err();
    assert!(err.is_illegal_argument());
}

#[test]
fn registered_types_are_resolvable() {
    let registry = TypeRegistry::with_builtin_types();
    let (_, known) = registry.register(TypeDescriptor::new("Positive", |v| {
        matches!(v, Value::Integer(i) if *i > 0)
    }));
    assert!(!known);
    let (_, known) = registry.register(TypeDescriptor::new("positive", |_| false));
    assert!(known, "names are canonical and the first registration is kept");
    let positive = registry.resolve(" POSITIVE ").expect("registered");
    assert!(positive.accepts(&Value::Integer(3)));
    assert!(!positive.accepts(&Value::Integer(-3)));
    assert!(registry.resolve("negative").is_err());
    assert!(registry.names().contains(&"number".to_string()));
}

#[test]
fn numeric_check() {
    let numeric = Check::numeric();
    assert!(holds(&numeric, &[Term::from(123), Term::from(77), Term::from(112.123), Term::from(44.5)]));
    assert!(!holds(&numeric, &[Term::from("x"), Term::from(123)]));
}

#[test]
fn string_and_null_checks() {
    assert!(holds(&Check::string(), &[Term::from("okay 1"), Term::from('c'), Term::from("ok 2")]));
    assert!(!holds(&Check::string(), &[Term::from("test"), Term::from(123), Term::from(true)]));
    assert!(holds(&Check::null(), &[Term::null()]));
    assert!(!holds(&Check::null(), &[Term::from("value"), Term::null()]));
}

#[test]
fn type_names_are_appended_per_value() {
    let mut returns = Vec::new();
    TypeName::new()
        .execute(
            false,
            &Context::empty(),
            &[Term::from(123), Term::from("test value"), Term::from(1.5), Term::null()],
            &mut returns,
        )
        .expect("type ok");
    let names: Vec<&str> = returns.iter().filter_map(|t| t.as_str()).collect();
    assert_eq!(names, vec!["integer", "string", "float", "null"]);
}
