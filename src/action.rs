//! The contract every action implements.
//!
//! An action is called with an ordered argument list and a caller owned return
//! list. It reports its outcome either by appending to the return list, by
//! returning a fuzzy verdict, or both. Unexpected input is never reported
//! through the verdict: it is an [`ActionError::IllegalArgument`].

// used to print out readable forms of a name
use std::fmt;

use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::fuzzy::FuzzyChannel;
use crate::term::Term;

// ------------- ActionName -------------
/// Hierarchical, slash separated name used for dispatch, e.g. `generic/type/is`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionName {
    path: String,
}

impl ActionName {
    pub fn new(segments: &[&str]) -> Self {
        let path = segments
            .iter()
            .flat_map(|s| s.split('/'))
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect::<Vec<String>>()
            .join("/");
        Self { path }
    }
    pub fn parse(path: &str) -> Self {
        Self::new(&[path])
    }
    pub fn as_str(&self) -> &str {
        &self.path
    }
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }
}
impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
impl From<&str> for ActionName {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

// ------------- Action -------------
pub trait Action: Send + Sync {
    fn name(&self) -> &ActionName;

    /// Callers must not invoke `execute` with fewer arguments than this.
    fn minimal_argument_number(&self) -> usize;

    /// Runs the action synchronously. `parallel` tells that the engine may be
    /// running other calls, also of this very instance, at the same time.
    fn execute(
        &self,
        parallel: bool,
        context: &Context,
        arguments: &[Term],
        returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel>;
}

/// Rejects argument lists shorter than the action's minimal argument number.
pub fn check_argument_number(
    action: &dyn Action,
    context: &Context,
    arguments: &[Term],
) -> Result<()> {
    let minimal = action.minimal_argument_number();
    if arguments.len() < minimal {
        return Err(ActionError::illegal_argument(
            context.name(),
            format!(
                "{} requires at least {} argument(s) but got {}",
                action.name(),
                minimal,
                arguments.len()
            ),
        ));
    }
    Ok(())
}
