//! Type tagged render functions for value printing actions.
//!
//! A [`FormatterRegistry`] is an ordered list of [`Formatter`]s. Rendering a
//! value applies the first formatter, in registration order, whose type accepts
//! the value; values nobody claims are written in their natural string form.
//! The registry lives as long as the action that owns it and is shared by all
//! of that action's calls, so it is copy-on-write behind a mutex: `add` swaps
//! in a new list while renders in flight keep working on their snapshot.

use std::sync::{Arc, Mutex, PoisonError};

// used to print out readable forms of a formatter
use std::fmt;

use tracing::debug;

use crate::term::{Term, Value};
use crate::types::TypeDescriptor;

pub type Render = Arc<dyn Fn(&Value) -> String + Send + Sync>;

// ------------- Formatter -------------
#[derive(Clone)]
pub struct Formatter {
    descriptor: TypeDescriptor,
    render: Render,
}

impl Formatter {
    pub fn new<F>(descriptor: TypeDescriptor, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            descriptor,
            render: Arc::new(render),
        }
    }
    /// Formats strings; other values never reach `render`.
    pub fn strings<F>(render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(
            TypeDescriptor::new("string", |v| matches!(v, Value::String(_))),
            move |v| match v {
                Value::String(s) => render(s),
                other => other.to_string(),
            },
        )
    }
    pub fn booleans<F>(render: F) -> Self
    where
        F: Fn(bool) -> String + Send + Sync + 'static,
    {
        Self::new(
            TypeDescriptor::new("boolean", |v| matches!(v, Value::Boolean(_))),
            move |v| match v {
                Value::Boolean(b) => render(*b),
                other => other.to_string(),
            },
        )
    }
    /// Formats integers and floats alike, widened to a float.
    pub fn numbers<F>(render: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self::new(
            TypeDescriptor::new("number", |v| matches!(v, Value::Integer(_) | Value::Float(_))),
            move |v| match v {
                Value::Integer(i) => render(*i as f64),
                Value::Float(x) => render(*x),
                other => other.to_string(),
            },
        )
    }
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
    pub fn accepts(&self, value: &Value) -> bool {
        self.descriptor.accepts(value)
    }
    pub fn format(&self, value: &Value) -> String {
        (self.render)(value)
    }
}
impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Formatter({})", self.descriptor)
    }
}

// ------------- FormatterRegistry -------------
#[derive(Debug, Default)]
pub struct FormatterRegistry {
    entries: Mutex<Arc<Vec<Formatter>>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    fn snapshot(&self) -> Arc<Vec<Formatter>> {
        Arc::clone(&self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
    /// Appends a formatter. Formatters registered earlier for a compatible type
    /// keep precedence over it.
    pub fn add(&self, formatter: Formatter) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(descriptor = %formatter.descriptor(), position = entries.len(), "adding formatter");
        let mut list = (**entries).clone();
        list.push(formatter);
        *entries = Arc::new(list);
    }
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn render(&self, value: &Value) -> String {
        render_with(&self.snapshot(), value)
    }
    /// Renders all values with the same snapshot, joins them with `separator`
    /// and terminates the line.
    pub fn render_line(&self, values: &[Term], separator: &str) -> String {
        let formatters = self.snapshot();
        let rendered: Vec<String> = values
            .iter()
            .map(|term| render_with(&formatters, term.raw()))
            .collect();
        rendered.join(separator) + "\n"
    }
}

// Null is written as nothing at all, never as a "null" text.
fn render_with(formatters: &[Formatter], value: &Value) -> String {
    formatters
        .iter()
        .find(|formatter| formatter.accepts(value))
        .map(|formatter| formatter.format(value))
        .unwrap_or_else(|| match value {
            Value::Null => String::new(),
            other => other.to_string(),
        })
}
