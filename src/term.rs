// used to share one immutable value between many argument and return lists
use std::sync::Arc;

// used to print out readable forms of a term
use std::fmt;

use crate::literal::Literal;

// ------------- Value -------------
/// The runtime values a term can carry. Sequences hold terms themselves, so
/// nesting is only possible through already constructed (immutable) terms and
/// can therefore never be cyclic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Character(char),
    String(String),
    List(Vec<Term>),
    Literal(Literal),
}

impl Value {
    /// The canonical name of the kind of value, as known by the type registry.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Character(_) => "character",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Literal(_) => "literal",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Character(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{}", s),
            Value::List(terms) => {
                let members: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
                write!(f, "[{}]", members.join(", "))
            }
            Value::Literal(l) => write!(f, "{}", l),
        }
    }
}

// ------------- Term -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    value: Arc<Value>,
}

impl Term {
    pub fn new(value: Value) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
    pub fn null() -> Self {
        Self::new(Value::Null)
    }
    // The wrapped value is only ever handed out by reference, so a term
    // keeps its value for its whole lifetime. Casting builds a new term.
    pub fn raw(&self) -> &Value {
        &self.value
    }
    pub fn kind(&self) -> &'static str {
        self.value.kind()
    }
    pub fn is_null(&self) -> bool {
        matches!(*self.value, Value::Null)
    }
    pub fn is_numeric(&self) -> bool {
        matches!(*self.value, Value::Integer(_) | Value::Float(_))
    }
    pub fn as_bool(&self) -> Option<bool> {
        match *self.value {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }
    pub fn as_i64(&self) -> Option<i64> {
        match *self.value {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }
    /// Numeric values of either kind widened to a float.
    pub fn as_f64(&self) -> Option<f64> {
        match *self.value {
            Value::Integer(i) => Some(i as f64),
            Value::Float(x) => Some(x),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match &*self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_list(&self) -> Option<&[Term]> {
        match &*self.value {
            Value::List(terms) => Some(terms),
            _ => None,
        }
    }
    pub fn as_literal(&self) -> Option<&Literal> {
        match &*self.value {
            Value::Literal(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Expands every sequence valued term depth-first into its members, keeping
/// the relative order. Terms that are not sequences are left untouched, so an
/// already flat list comes back as it went in.
pub fn flatten(terms: &[Term]) -> Vec<Term> {
    let mut flat = Vec::with_capacity(terms.len());
    flatten_into(terms, &mut flat);
    flat
}

fn flatten_into(terms: &[Term], flat: &mut Vec<Term>) {
    for term in terms {
        match term.raw() {
            Value::List(members) => flatten_into(members, flat),
            _ => flat.push(term.clone()),
        }
    }
}

// ------------- Conversions -------------
impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Self::new(Value::Boolean(b))
    }
}
impl From<i32> for Term {
    fn from(i: i32) -> Self {
        Self::new(Value::Integer(i.into()))
    }
}
impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Self::new(Value::Integer(i))
    }
}
impl From<f32> for Term {
    fn from(x: f32) -> Self {
        Self::new(Value::Float(x.into()))
    }
}
impl From<f64> for Term {
    fn from(x: f64) -> Self {
        Self::new(Value::Float(x))
    }
}
impl From<char> for Term {
    fn from(c: char) -> Self {
        Self::new(Value::Character(c))
    }
}
impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Self::new(Value::String(s.to_owned()))
    }
}
impl From<String> for Term {
    fn from(s: String) -> Self {
        Self::new(Value::String(s))
    }
}
impl From<Vec<Term>> for Term {
    fn from(terms: Vec<Term>) -> Self {
        Self::new(Value::List(terms))
    }
}
impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Self::new(Value::Literal(l))
    }
}
impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(o: Option<T>) -> Self {
        o.map_or_else(Term::null, Into::into)
    }
}
