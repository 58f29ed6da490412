use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;

use fuzzaction::action::Action;
use fuzzaction::context::Context;
use fuzzaction::formatter::{Formatter, FormatterRegistry};
use fuzzaction::print::Print;
use fuzzaction::term::{Term, Value};
use fuzzaction::types::TypeDescriptor;

/// In-memory sink whose content stays readable after handing it to `Print`.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf8")
    }
    fn reset(&self) {
        self.0.lock().unwrap().clear();
    }
}
impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn print(action: &Print, arguments: &[Term]) -> bool {
    let context = Context::empty();
    let verdict = action
        .execute(false, &context, arguments, &mut Vec::new())
        .expect("print ok");
    context.defuzzify(verdict)
}

#[test]
fn prints_natural_forms_joined_by_separator() {
    let captured = Captured::default();
    let action = Print::new(captured.clone(), "-");
    assert!(print(&action, &[Term::from("foobar"), Term::from(1234), Term::from(true)]));
    assert_eq!(captured.text(), "foobar-1234-true\n");

    captured.reset();
    print(&action, &[Term::null()]);
    assert_eq!(captured.text(), "\n", "null prints as nothing");
}

#[test]
fn formatters_apply_in_registration_order() {
    let captured = Captured::default();
    let action = Print::new(captured.clone(), "-");
    action.formatters().add(Formatter::strings(|s| s.to_uppercase()));
    action
        .formatters()
        .add(Formatter::booleans(|b| if b { "yes".into() } else { "no".into() }));
    assert!(print(&action, &[Term::from("foobar"), Term::from(1234), Term::from(true)]));
    assert_eq!(captured.text(), "FOOBAR-1234-yes\n");
}

#[test]
fn list_members_are_printed_and_formatted_one_by_one() {
    let captured = Captured::default();
    let action = Print::new(captured.clone(), "-");
    action.formatters().add(Formatter::strings(|s| s.to_uppercase()));
    let nested = Term::from(vec![Term::from("a"), Term::from(vec![Term::from("b"), Term::from(2)])]);
    assert!(print(&action, &[Term::from("x"), nested, Term::from(Vec::<Term>::new())]));
    assert_eq!(captured.text(), "X-A-B-2\n");
}

#[test]
fn first_registered_compatible_formatter_wins() {
    let registry = FormatterRegistry::new();
    registry.add(Formatter::numbers(|n| format!("#{n}")));
    registry.add(Formatter::new(
        TypeDescriptor::new("integer", |v| matches!(v, Value::Integer(_))),
        |_| "never".into(),
    ));
    registry.add(Formatter::new(TypeDescriptor::new("any", |_| true), |v| format!("<{v}>")));
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.render(&Value::Integer(7)), "#7");
    assert_eq!(registry.render(&Value::Float(0.5)), "#0.5");
    assert_eq!(registry.render(&Value::String("s".into())), "<s>");
}

#[test]
fn unclaimed_null_renders_empty() {
    let registry = FormatterRegistry::new();
    registry.add(Formatter::strings(|s| s.to_uppercase()));
    assert_eq!(registry.render(&Value::Null), "");
    assert_eq!(
        registry.render_line(&[Term::from("a"), Term::null(), Term::from(2)], ", "),
        "A, , 2\n"
    );
}

#[test]
fn concurrent_registration_and_printing() {
    let captured = Captured::default();
    let action = Arc::new(Print::new(captured.clone(), " "));
    let mut handles = Vec::new();
    for i in 0..8 {
        let action = Arc::clone(&action);
        handles.push(thread::spawn(move || {
            if i % 2 == 0 {
                action.formatters().add(Formatter::booleans(|b| b.to_string()));
            }
            let context = Context::empty();
            action
                .execute(true, &context, &[Term::from("line"), Term::from(i)], &mut Vec::new())
                .expect("print ok");
        }));
    }
    for handle in handles {
        handle.join().expect("thread");
    }
    assert_eq!(action.formatters().len(), 4);
    let text = captured.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|line| line.starts_with("line ")), "lines never interleave");
}
