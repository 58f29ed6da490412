//! Fail-fast parsing of string arguments into structured terms.
//!
//! A [`ParseAction`] reads every flattened argument as a string and runs it
//! through a [`Parse`] grammar. Either every argument parses, and the return
//! list receives one term per argument in argument order, or the call stops at
//! the first unparseable one with an illegal argument naming it. Terms parsed
//! before that point stay in the return list.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::action::{Action, ActionName, check_argument_number};
use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::fuzzy::FuzzyChannel;
use crate::term::{Term, flatten};

pub trait Parse: Send + Sync {
    /// The structured term the input stands for, `None` if it does not parse.
    fn parse(&self, input: &str) -> Option<Term>;
}

impl<F> Parse for F
where
    F: Fn(&str) -> Option<Term> + Send + Sync,
{
    fn parse(&self, input: &str) -> Option<Term> {
        self(input)
    }
}

pub struct ParseAction<P: Parse> {
    name: ActionName,
    grammar: P,
}

impl<P: Parse> ParseAction<P> {
    pub fn new(name: ActionName, grammar: P) -> Self {
        Self { name, grammar }
    }
    pub fn grammar(&self) -> &P {
        &self.grammar
    }
    // A grammar that panics counts as a failed parse; the panic itself must
    // not cross the action boundary.
    fn attempt(&self, input: &str) -> Option<Term> {
        panic::catch_unwind(AssertUnwindSafe(|| self.grammar.parse(input))).unwrap_or(None)
    }
}

impl<P: Parse> Action for ParseAction<P> {
    fn name(&self) -> &ActionName {
        &self.name
    }
    fn minimal_argument_number(&self) -> usize {
        1
    }
    fn execute(
        &self,
        _parallel: bool,
        context: &Context,
        arguments: &[Term],
        returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        check_argument_number(self, context, arguments)?;
        for (index, term) in flatten(arguments).iter().enumerate() {
            let input = term.as_str().ok_or_else(|| {
                ActionError::illegal_value(
                    context.name(),
                    format!("cannot parse {} value", term.kind()),
                    term.to_string(),
                )
            })?;
            match self.attempt(input) {
                Some(parsed) => returns.push(parsed),
                None => {
                    debug!(action = %self.name, index, input, "cannot parse");
                    return Err(ActionError::illegal_value(
                        context.name(),
                        "cannot parse",
                        input,
                    ));
                }
            }
        }
        Ok(FuzzyChannel::empty())
    }
}
