//! Fail-fast element-wise conversion.
//!
//! A [`CastAction`] flattens its arguments and hands each element, in order,
//! to a [`Cast`] strategy which appends whatever the element converts to. The
//! first element the strategy refuses aborts the call with an illegal argument.
//! Nothing is rolled back: results appended for earlier elements stay in the
//! return list.

use tracing::debug;

use crate::action::{Action, ActionName, check_argument_number};
use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::fuzzy::FuzzyChannel;
use crate::term::{Term, flatten};

pub trait Cast: Send + Sync {
    /// Appends the converted term(s) to `returns` and answers `true`, or
    /// answers `false` when the term cannot be converted.
    fn cast(&self, term: &Term, returns: &mut Vec<Term>) -> bool;
}

impl<F> Cast for F
where
    F: Fn(&Term, &mut Vec<Term>) -> bool + Send + Sync,
{
    fn cast(&self, term: &Term, returns: &mut Vec<Term>) -> bool {
        self(term, returns)
    }
}

pub struct CastAction<C: Cast> {
    name: ActionName,
    strategy: C,
}

impl<C: Cast> CastAction<C> {
    pub fn new(name: ActionName, strategy: C) -> Self {
        Self { name, strategy }
    }
    pub fn strategy(&self) -> &C {
        &self.strategy
    }
}

impl<C: Cast> Action for CastAction<C> {
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
            if !self.strategy.cast(term, returns) {
                debug!(action = %self.name, index, kind = term.kind(), "cannot cast");
                return Err(ActionError::illegal_value(
                    context.name(),
                    format!("cannot cast {} value", term.kind()),
                    term.to_string(),
                ));
            }
        }
        Ok(FuzzyChannel::empty())
    }
}
