use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use crate::action::{Action, ActionName};
use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::formatter::FormatterRegistry;
use crate::fuzzy::FuzzyChannel;
use crate::term::{Term, flatten};

/// Writes its flattened arguments as one line to a sink, each rendered through
/// the action's formatters and joined by the separator.
pub struct Print {
    name: ActionName,
    sink: Mutex<Box<dyn Write + Send>>,
    separator: String,
    formatters: FormatterRegistry,
}

impl Print {
    pub fn new<W>(sink: W, separator: &str) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: ActionName::new(&["generic", "print"]),
            sink: Mutex::new(Box::new(sink)),
            separator: separator.to_owned(),
            formatters: FormatterRegistry::new(),
        }
    }
    pub fn stdout(separator: &str) -> Self {
        Self::new(io::stdout(), separator)
    }
    pub fn separator(&self) -> &str {
        &self.separator
    }
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }
}

impl Action for Print {
    fn name(&self) -> &ActionName {
        &self.name
    }
    fn minimal_argument_number(&self) -> usize {
        0
    }
    fn execute(
        &self,
        _parallel: bool,
        context: &Context,
        arguments: &[Term],
        _returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        let line = self.formatters.render_line(&flatten(arguments), &self.separator);
        trace!(action = %self.name, line = line.trim_end(), "printing");
        // one lock per line, so lines of concurrent calls never interleave
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        sink.write_all(line.as_bytes())
            .and_then(|_| sink.flush())
            .map_err(|e| ActionError::execution(context.name(), e.to_string()))?;
        Ok(FuzzyChannel::empty())
    }
}
