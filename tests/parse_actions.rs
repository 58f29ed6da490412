use fuzzaction::action::{Action, ActionName};
use fuzzaction::context::Context;
use fuzzaction::generic::{parse_literal_action, parse_number_action};
use fuzzaction::literal::Literal;
use fuzzaction::parse::ParseAction;
use fuzzaction::term::Term;

fn literal(functor: &str, values: Vec<Term>) -> Literal {
    Literal::new(functor, values).expect("valid functor")
}

#[test]
fn parses_a_literal_with_mixed_values() {
    let mut returns = Vec::new();
    parse_literal_action()
        .execute(
            false,
            &Context::empty(),
            &[Term::from("main/parsefunctor( \"hello\", 666, false )")],
            &mut returns,
        )
        .expect("parse ok");
    assert_eq!(returns.len(), 1);
    assert_eq!(
        returns[0].as_literal(),
        Some(&literal(
            "main/parsefunctor",
            vec![Term::from("hello"), Term::from(666.0), Term::from(false)]
        ))
    );
}

#[test]
fn parses_every_argument_in_order() {
    let mut returns = Vec::new();
    parse_literal_action()
        .execute(
            false,
            &Context::empty(),
            &[Term::from("a(1)"), Term::from("b(2)")],
            &mut returns,
        )
        .expect("parse ok");
    let functors: Vec<&str> = returns
        .iter()
        .filter_map(|t| t.as_literal())
        .map(|l| l.functor())
        .collect();
    assert_eq!(functors, vec!["a", "b"]);
    assert_eq!(returns[1].as_literal().map(|l| l.values().to_vec()), Some(vec![Term::from(2.0)]));
}

#[test]
fn first_unparseable_argument_is_named() {
    let mut returns = Vec::new();
    let err = parse_literal_action()
        .execute(
            false,
            &Context::empty(),
            &[Term::from("functor(1,2)"), Term::from("not-valid"), Term::from("c(3)")],
            &mut returns,
        )
        .unwrap_err();
    assert!(err.is_illegal_argument());
    assert_eq!(err.offending_value(), Some("not-valid"));
    assert_eq!(returns.len(), 1, "the literal parsed before the failure stays");
}

#[test]
fn uppercase_functors_and_variables_do_not_parse() {
    let mut returns = Vec::new();
    let err = parse_literal_action()
        .execute(
            false,
            &Context::empty(),
            &[Term::from("Main/parsefunctor( hello, XXXXX, false )")],
            &mut returns,
        )
        .unwrap_err();
    assert!(err.is_illegal_argument());
    assert!(returns.is_empty());
}

#[test]
fn non_string_arguments_cannot_be_parsed() {
    let mut returns = Vec::new();
    let err = parse_number_action()
        .execute(false, &Context::empty(), &[Term::from(12)], &mut returns)
        .unwrap_err();
    assert!(err.is_illegal_argument());
}

#[test]
fn parses_numbers() {
    let mut returns = Vec::new();
    parse_number_action()
        .execute(
            false,
            &Context::empty(),
            &[Term::from("732.489"), Term::from("64.091248"), Term::from("-78129.01")],
            &mut returns,
        )
        .expect("parse ok");
    let numbers: Vec<f64> = returns.iter().filter_map(|t| t.as_f64()).collect();
    assert_eq!(numbers, vec![732.489, 64.091248, -78129.01]);

    let err = parse_number_action()
        .execute(false, &Context::empty(), &[Term::from("foo")], &mut Vec::new())
        .unwrap_err();
    assert_eq!(err.offending_value(), Some("foo"));
}

#[test]
fn panicking_grammars_count_as_failed_parses() {
    let action = ParseAction::new(ActionName::parse("test/fragile"), |input: &str| -> Option<Term> {
        if input == "boom" {
            panic!("grammar failure");
        }
        Some(Term::from(input.len() as i64))
    });
    let mut returns = Vec::new();
    let err = action
        .execute(
            false,
            &Context::empty(),
            &[Term::from("ok"), Term::from("boom")],
            &mut returns,
        )
        .unwrap_err();
    assert!(err.is_illegal_argument());
    assert_eq!(err.offending_value(), Some("boom"));
    assert_eq!(returns, vec![Term::from(2)]);
}
