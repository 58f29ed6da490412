//! Name based dispatch of actions.
//!
//! The engine looks actions up by their hierarchical name and calls them
//! through [`Dispatcher::invoke`], which rejects calls with too few arguments
//! before the action ever runs. Registration is rare and lookups are many, so
//! the table is copy-on-write: invocations hold a snapshot, never the lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, debug_span, warn};

use crate::action::{Action, ActionName, check_argument_number};
use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::fuzzy::FuzzyChannel;
use crate::generic;
use crate::term::Term;
use crate::types::NameHasher;

type ActionTable = HashMap<ActionName, Arc<dyn Action>, NameHasher>;

#[derive(Default)]
pub struct Dispatcher {
    actions: Mutex<Arc<ActionTable>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }
    /// A dispatcher knowing the whole generic library.
    pub fn with_generic_actions(print_separator: &str) -> Self {
        let dispatcher = Self::new();
        for action in generic::actions(print_separator) {
            dispatcher.register(action);
        }
        dispatcher
    }
    fn snapshot(&self) -> Arc<ActionTable> {
        Arc::clone(&self.actions.lock().unwrap_or_else(PoisonError::into_inner))
    }
    /// Registers an action under its name, returning the kept action and
    /// whether the name was previously known. A known name keeps its action.
    pub fn register(&self, action: Arc<dyn Action>) -> (Arc<dyn Action>, bool) {
        let mut actions = self.actions.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(kept) = actions.get(action.name()) {
            return (Arc::clone(kept), true);
        }
        debug!(name = %action.name(), minimal = action.minimal_argument_number(), "registering action");
        let mut table = (**actions).clone();
        table.insert(action.name().clone(), Arc::clone(&action));
        *actions = Arc::new(table);
        (action, false)
    }
    pub fn get(&self, name: &ActionName) -> Option<Arc<dyn Action>> {
        self.snapshot().get(name).cloned()
    }
    pub fn names(&self) -> Vec<ActionName> {
        let mut names: Vec<ActionName> = self.snapshot().keys().cloned().collect();
        names.sort();
        names
    }
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn invoke(
        &self,
        name: &ActionName,
        parallel: bool,
        context: &Context,
        arguments: &[Term],
        returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        let action = self.get(name).ok_or_else(|| {
            ActionError::illegal_value(context.name(), "unknown action", name.as_str())
        })?;
        let span = debug_span!("action", name = %name, arguments = arguments.len(), parallel);
        let _entered = span.enter();
        check_argument_number(action.as_ref(), context, arguments)
            .and_then(|_| action.execute(parallel, context, arguments, returns))
            .inspect(|_| debug!(returned = returns.len(), "action done"))
            .inspect_err(|e| warn!(error = %e, "action failed"))
    }
}
