//! Fuzzaction – the standard action library of an agent-language runtime.
//!
//! Plans of an agent call *actions*: small named units that receive an ordered
//! list of [`term::Term`] arguments and a return list owned by the caller. An
//! action reports back in two ways:
//! * by appending terms to the return list (bindings for the plan), and/or
//! * by a fuzzy verdict, a lazily evaluated [`fuzzy::FuzzyChannel`] of
//!   [`fuzzy::FuzzyValue`]s sourced from the membership function of the
//!   calling [`context::Context`].
//!
//! Input an action cannot make sense of is never a verdict. It is an
//! [`ActionError::IllegalArgument`], fatal to the call and reported upward by
//! the dispatcher.
//!
//! ## Modules
//! * [`term`] – Terms, values and depth-first flattening of nested arguments.
//! * [`fuzzy`] – Fuzzy values, result channels, membership and defuzzification.
//! * [`context`] – The capabilities an action may use while executing.
//! * [`action`] – The [`action::Action`] contract and hierarchical names.
//! * [`cast`] / [`parse`] – Fail-fast executors for element-wise conversion and
//!   string parsing, parameterized by a strategy.
//! * [`formatter`] – Ordered, type tagged render functions for printing.
//! * [`types`] – The registry resolving type names to membership predicates.
//! * [`literal`] – Structured literals and their grammar (`literal.pest`).
//! * [`generic`] / [`print`] – The concrete actions.
//! * [`dispatch`] – Name based lookup enforcing minimal argument numbers.
//! * [`settings`] – Layered configuration.
//!
//! ## Quick Start
//! ```
//! use fuzzaction::{action::ActionName, context::Context, dispatch::Dispatcher, term::Term};
//! let dispatcher = Dispatcher::with_generic_actions(" ");
//! let context = Context::empty();
//! let mut returns = Vec::new();
//! let verdict = dispatcher
//!     .invoke(
//!         &ActionName::parse("generic/type/isnumeric"),
//!         false,
//!         &context,
//!         &[Term::from(123), Term::from(44.5)],
//!         &mut returns,
//!     )
//!     .unwrap();
//! assert!(context.defuzzify(verdict));
//! ```
//!
//! ## Concurrency
//! Actions are `Send + Sync` and may be executed concurrently, also on the same
//! instance. The only state shared between calls lives in registries (types,
//! formatters, dispatch table), which are copy-on-write behind a mutex.

pub mod action;
pub mod cast;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod formatter;
pub mod fuzzy;
pub mod generic;
pub mod literal;
pub mod parse;
pub mod print;
pub mod settings;
pub mod term;
pub mod types;

pub use error::{ActionError, Result};
