//! Structured literals of the form `[~][@]functor(term, term, ...)` and the
//! pest grammar (`literal.pest`) that reads them.
//!
//! The textual form is the one used by persisted literals, so whatever
//! [`parse_literal`] accepts, [`Literal`]'s `Display` writes back in the same
//! syntax. Numbers are always read as floating point values.

use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

// used to print out readable forms of a literal
use std::fmt;
use std::str::FromStr;

use crate::term::{Term, Value};

#[derive(Parser)]
#[grammar = "literal.pest"]
struct LiteralParser;

lazy_static! {
    static ref FUNCTOR: Regex =
        Regex::new(r"^[a-z][A-Za-z0-9_]*(/[a-z][A-Za-z0-9_]*)*$").expect("functor pattern");
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at {line}:{col}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

/// Why a literal could not be built from a functor and values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidLiteral {
    #[error("invalid functor {0}")]
    Functor(String),
    #[error("{kind} value '{value}' has no literal form")]
    Value { kind: &'static str, value: String },
}

impl InvalidLiteral {
    /// The functor or value that was refused.
    pub fn offending(&self) -> &str {
        match self {
            InvalidLiteral::Functor(functor) => functor,
            InvalidLiteral::Value { value, .. } => value,
        }
    }
}

impl SyntaxError {
    fn from_pest(e: pest::error::Error<Rule>) -> Self {
        let (line, col) = match e.line_col {
            LineColLocation::Pos(position) => position,
            LineColLocation::Span(start, _) => start,
        };
        Self {
            message: e.variant.message().to_string(),
            line,
            col,
        }
    }
    fn at(pair: &Pair<Rule>, message: String) -> Self {
        let (line, col) = pair.line_col();
        Self { message, line, col }
    }
}

// ------------- Literal -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    functor: String,
    values: Vec<Term>,
    negated: bool,
    at: bool,
}

impl Literal {
    /// Builds a literal, checking that the functor could have been written in
    /// literal syntax. Values are stored the way the grammar reads them back:
    /// integers as floats and characters as strings. Null and non-finite
    /// numbers have no written form and are refused.
    pub fn new(functor: &str, values: Vec<Term>) -> Result<Self, InvalidLiteral> {
        if !FUNCTOR.is_match(functor) {
            return Err(InvalidLiteral::Functor(functor.to_owned()));
        }
        let values = values
            .iter()
            .map(readable)
            .collect::<Result<Vec<Term>, InvalidLiteral>>()?;
        Ok(Self {
            functor: functor.to_owned(),
            values,
            negated: false,
            at: false,
        })
    }
    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }
    pub fn at(mut self, at: bool) -> Self {
        self.at = at;
        self
    }
    pub fn functor(&self) -> &str {
        &self.functor
    }
    pub fn values(&self) -> &[Term] {
        &self.values
    }
    pub fn is_negated(&self) -> bool {
        self.negated
    }
    pub fn has_at(&self) -> bool {
        self.at
    }
    pub fn arity(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negated {
            write!(f, "~")?;
        }
        if self.at {
            write!(f, "@")?;
        }
        write!(f, "{}", self.functor)?;
        if !self.values.is_empty() {
            write!(f, "(")?;
            write_terms(f, &self.values)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl FromStr for Literal {
    type Err = SyntaxError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_literal(s)
    }
}

fn readable(term: &Term) -> Result<Term, InvalidLiteral> {
    let refuse = || InvalidLiteral::Value {
        kind: term.kind(),
        value: term.to_string(),
    };
    match term.raw() {
        Value::Integer(i) => Ok(Term::from(*i as f64)),
        Value::Float(x) if !x.is_finite() => Err(refuse()),
        Value::Character(c) => Ok(Term::from(c.to_string())),
        Value::Null => Err(refuse()),
        Value::List(terms) => Ok(Term::from(
            terms
                .iter()
                .map(readable)
                .collect::<Result<Vec<Term>, InvalidLiteral>>()?,
        )),
        // a bare atom named true or false would be read back as a boolean
        Value::Literal(l)
            if l.values.is_empty()
                && !l.negated
                && !l.at
                && (l.functor == "true" || l.functor == "false") =>
        {
            Err(refuse())
        }
        _ => Ok(term.clone()),
    }
}

fn write_terms(f: &mut fmt::Formatter, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_term(f, term)?;
    }
    Ok(())
}

// Values of a literal are already in readable form, so only strings and
// lists differ from their natural string form.
fn write_term(f: &mut fmt::Formatter, term: &Term) -> fmt::Result {
    match term.raw() {
        Value::String(s) => write!(f, "\"{}\"", escape(s)),
        Value::List(terms) => {
            write!(f, "[")?;
            write_terms(f, terms)?;
            write!(f, "]")
        }
        other => write!(f, "{}", other),
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape(s: &str) -> String {
    let mut unescaped = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('r') => unescaped.push('\r'),
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

// ------------- Parsing -------------
/// Parses one complete literal, e.g. `main/parsefunctor("hello", 666, false)`.
pub fn parse_literal(input: &str) -> Result<Literal, SyntaxError> {
    let mut pairs =
        LiteralParser::parse(Rule::literal_input, input).map_err(SyntaxError::from_pest)?;
    let literal = pairs
        .next()
        .and_then(|input| input.into_inner().next())
        .ok_or_else(|| SyntaxError {
            message: "expected literal".into(),
            line: 1,
            col: 1,
        })?;
    build_literal(literal)
}

/// Parses a single term in literal syntax: a string, number, boolean, list
/// or literal.
pub fn parse_term(input: &str) -> Result<Term, SyntaxError> {
    let mut pairs =
        LiteralParser::parse(Rule::term_input, input).map_err(SyntaxError::from_pest)?;
    let term = pairs
        .next()
        .and_then(|input| input.into_inner().next())
        .ok_or_else(|| SyntaxError {
            message: "expected term".into(),
            line: 1,
            col: 1,
        })?;
    build_term(term)
}

fn build_literal(pair: Pair<Rule>) -> Result<Literal, SyntaxError> {
    let mut negated = false;
    let mut at = false;
    let mut functor = String::new();
    let mut values = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::negation => negated = true,
            Rule::at => at = true,
            Rule::functor => functor = inner.as_str().to_owned(),
            Rule::arguments => {
                for argument in inner.into_inner() {
                    values.push(build_term(argument)?);
                }
            }
            _ => (),
        }
    }
    Ok(Literal {
        functor,
        values,
        negated,
        at,
    })
}

fn build_term(pair: Pair<Rule>) -> Result<Term, SyntaxError> {
    match pair.as_rule() {
        Rule::string => {
            let content = pair.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
            Ok(Term::from(unescape(content)))
        }
        Rule::number => {
            let number = pair
                .as_str()
                .parse::<f64>()
                .map_err(|e| SyntaxError::at(&pair, e.to_string()))?;
            Ok(Term::from(number))
        }
        Rule::boolean => Ok(Term::from(pair.as_str() == "true")),
        Rule::list => {
            let members = pair
                .into_inner()
                .map(build_term)
                .collect::<Result<Vec<Term>, SyntaxError>>()?;
            Ok(Term::from(members))
        }
        Rule::literal => Ok(Term::from(build_literal(pair)?)),
        _ => Err(SyntaxError::at(&pair, format!("unexpected {:?}", pair.as_rule()))),
    }
}
