//! The generic action library: type checks, conversions, parsers and a few
//! utilities every agent program tends to need.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::action::{Action, ActionName, check_argument_number};
use crate::cast::CastAction;
use crate::context::Context;
use crate::error::{ActionError, Result};
use crate::fuzzy::{FuzzyChannel, FuzzyValue};
use crate::literal::{Literal, parse_literal};
use crate::parse::{Parse, ParseAction};
use crate::print::Print;
use crate::term::{Term, Value, flatten};

/// Every action of the library, printing to stdout with the given separator.
pub fn actions(print_separator: &str) -> Vec<Arc<dyn Action>> {
    vec![
        Arc::new(Is::new()),
        Arc::new(Check::numeric()),
        Arc::new(Check::string()),
        Arc::new(Check::null()),
        Arc::new(TypeName::new()),
        Arc::new(to_string_action()),
        Arc::new(to_number_action()),
        Arc::new(parse_literal_action()),
        Arc::new(parse_number_action()),
        Arc::new(CreateLiteral::new()),
        Arc::new(GenerateUuid::new()),
        Arc::new(Throw::new()),
        Arc::new(FuzzyReturn::new()),
        Arc::new(Print::stdout(print_separator)),
    ]
}

// ------------- Type checks -------------
/// `generic/type/is`: the first argument names a type, every further value
/// must belong to it.
pub struct Is {
    name: ActionName,
}

impl Is {
    pub fn new() -> Self {
        Self {
            name: ActionName::new(&["generic", "type", "is"]),
        }
    }
}
impl Default for Is {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for Is {
    fn name(&self) -> &ActionName {
        &self.name
    }
    fn minimal_argument_number(&self) -> usize {
        2
    }
    fn execute(
        &self,
        _parallel: bool,
        context: &Context,
        arguments: &[Term],
        _returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        check_argument_number(self, context, arguments)?;
        let arguments = flatten(arguments);
        let (type_name, values) = match arguments.split_first() {
            Some((first, rest)) if !rest.is_empty() => (first, rest),
            _ => {
                return Err(ActionError::illegal_argument(
                    context.name(),
                    "expected a type name followed by at least one value",
                ));
            }
        };
        let type_name = type_name.as_str().ok_or_else(|| {
            ActionError::illegal_value(context.name(), "type name must be a string", type_name.to_string())
        })?;
        let descriptor = context.resolve_type(type_name).map_err(|e| {
            debug!(action = %self.name, type_name, "unknown type");
            ActionError::illegal_value(context.name(), e.to_string(), type_name)
        })?;
        Ok(context.verdict(values.iter().all(|v| descriptor.accepts(v.raw()))))
    }
}

/// Verdict over a fixed predicate that all (flattened) arguments must satisfy.
pub struct Check {
    name: ActionName,
    predicate: fn(&Term) -> bool,
}

impl Check {
    pub fn new(name: ActionName, predicate: fn(&Term) -> bool) -> Self {
        Self { name, predicate }
    }
    pub fn numeric() -> Self {
        Self::new(ActionName::new(&["generic", "type", "isnumeric"]), Term::is_numeric)
    }
    /// Characters count as (one letter) strings.
    pub fn string() -> Self {
        Self::new(ActionName::new(&["generic", "type", "isstring"]), |t| {
            matches!(t.raw(), Value::String(_) | Value::Character(_))
        })
    }
    pub fn null() -> Self {
        Self::new(ActionName::new(&["generic", "type", "isnull"]), Term::is_null)
    }
}

impl Action for Check {
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
        _returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        check_argument_number(self, context, arguments)?;
        Ok(context.verdict(flatten(arguments).iter().all(self.predicate)))
    }
}

/// `generic/type/type`: appends the canonical type name of every value.
pub struct TypeName {
    name: ActionName,
}

impl TypeName {
    pub fn new() -> Self {
        Self {
            name: ActionName::new(&["generic", "type", "type"]),
        }
    }
}
impl Default for TypeName {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for TypeName {
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
        returns.extend(flatten(arguments).iter().map(|t| Term::from(t.kind())));
        Ok(FuzzyChannel::empty())
    }
}

// ------------- Conversions -------------
pub type CastFn = fn(&Term, &mut Vec<Term>) -> bool;

/// `generic/type/tostring`: the natural string form of every value.
pub fn to_string_action() -> CastAction<CastFn> {
    CastAction::<CastFn>::new(ActionName::new(&["generic", "type", "tostring"]), |term, returns| {
        returns.push(Term::from(term.to_string()));
        true
    })
}

/// `generic/type/tonumber`: numeric values as floats, anything else fails.
pub fn to_number_action() -> CastAction<CastFn> {
    CastAction::<CastFn>::new(ActionName::new(&["generic", "type", "tonumber"]), |term, returns| {
        match term.as_f64() {
            Some(number) => {
                returns.push(Term::from(number));
                true
            }
            None => false,
        }
    })
}

/// Reads strings in literal syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralGrammar;

impl Parse for LiteralGrammar {
    fn parse(&self, input: &str) -> Option<Term> {
        match parse_literal(input) {
            Ok(literal) => Some(Term::from(literal)),
            Err(e) => {
                debug!(input, error = %e, "not a literal");
                None
            }
        }
    }
}

/// Reads finite decimal numbers, surrounding whitespace allowed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberGrammar;

impl Parse for NumberGrammar {
    fn parse(&self, input: &str) -> Option<Term> {
        input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Term::from)
    }
}

pub fn parse_literal_action() -> ParseAction<LiteralGrammar> {
    ParseAction::new(ActionName::new(&["generic", "type", "parseliteral"]), LiteralGrammar)
}

pub fn parse_number_action() -> ParseAction<NumberGrammar> {
    ParseAction::new(ActionName::new(&["generic", "type", "parsenumber"]), NumberGrammar)
}

/// `generic/type/createliteral`: a functor followed by the literal's values.
pub struct CreateLiteral {
    name: ActionName,
}

impl CreateLiteral {
    pub fn new() -> Self {
        Self {
            name: ActionName::new(&["generic", "type", "createliteral"]),
        }
    }
}
impl Default for CreateLiteral {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for CreateLiteral {
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
        let arguments = flatten(arguments);
        let Some((functor, values)) = arguments.split_first() else {
            return Err(ActionError::illegal_argument(context.name(), "missing functor"));
        };
        let functor = functor.as_str().ok_or_else(|| {
            ActionError::illegal_value(context.name(), "not a functor", functor.to_string())
        })?;
        let literal = Literal::new(functor, values.to_vec()).map_err(|e| {
            ActionError::illegal_value(context.name(), e.to_string(), e.offending())
        })?;
        returns.push(Term::from(literal));
        Ok(FuzzyChannel::empty())
    }
}

// ------------- Utilities -------------
const MAXIMAL_UUID_COUNT: usize = 1 << 16;

/// `generic/uuid`: one random identifier, or as many as the numeric
/// arguments add up to.
pub struct GenerateUuid {
    name: ActionName,
}

impl GenerateUuid {
    pub fn new() -> Self {
        Self {
            name: ActionName::new(&["generic", "uuid"]),
        }
    }
}
impl Default for GenerateUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for GenerateUuid {
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
        returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        let mut count: usize = 0;
        for term in flatten(arguments) {
            let n = match term.as_f64() {
                Some(n) if n >= 0. && n.fract() == 0. => n,
                _ => {
                    return Err(ActionError::illegal_value(
                        context.name(),
                        "count must be a non-negative whole number",
                        term.to_string(),
                    ));
                }
            };
            count = Some(n)
                .filter(|n| *n <= MAXIMAL_UUID_COUNT as f64)
                .and_then(|n| count.checked_add(n as usize))
                .filter(|count| *count <= MAXIMAL_UUID_COUNT)
                .ok_or_else(|| {
                    ActionError::illegal_value(
                        context.name(),
                        format!("at most {MAXIMAL_UUID_COUNT} identifiers per call"),
                        term.to_string(),
                    )
                })?;
        }
        if arguments.is_empty() {
            count = 1;
        }
        returns.extend((0..count).map(|_| Term::from(Uuid::new_v4().to_string())));
        Ok(FuzzyChannel::empty())
    }
}

/// `generic/throw`: fails the plan step when the first argument is true, with
/// the remaining arguments as message.
pub struct Throw {
    name: ActionName,
}

impl Throw {
    pub fn new() -> Self {
        Self {
            name: ActionName::new(&["generic", "throw"]),
        }
    }
}
impl Default for Throw {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for Throw {
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
        _returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        check_argument_number(self, context, arguments)?;
        let arguments = flatten(arguments);
        let Some((condition, message)) = arguments.split_first() else {
            return Err(ActionError::illegal_argument(context.name(), "missing condition"));
        };
        let raise = condition.as_bool().ok_or_else(|| {
            ActionError::illegal_value(context.name(), "condition must be a boolean", condition.to_string())
        })?;
        if raise {
            let message: Vec<String> = message.iter().map(|t| t.to_string()).collect();
            let message = if message.is_empty() {
                String::from("thrown")
            } else {
                message.join(" ")
            };
            return Err(ActionError::execution(context.name(), message));
        }
        Ok(FuzzyChannel::empty())
    }
}

/// `generic/fuzzyreturn`: pairs of (truth, degree) turned into a verdict of
/// explicit fuzzy values. Truths may be booleans or the strings
/// `"true"`/`"false"`.
pub struct FuzzyReturn {
    name: ActionName,
}

impl FuzzyReturn {
    pub fn new() -> Self {
        Self {
            name: ActionName::new(&["generic", "fuzzyreturn"]),
        }
    }
}
impl Default for FuzzyReturn {
    fn default() -> Self {
        Self::new()
    }
}

fn truth(term: &Term) -> Option<bool> {
    match term.raw() {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => s.trim().parse::<bool>().ok(),
        _ => None,
    }
}

impl Action for FuzzyReturn {
    fn name(&self) -> &ActionName {
        &self.name
    }
    fn minimal_argument_number(&self) -> usize {
        2
    }
    fn execute(
        &self,
        _parallel: bool,
        context: &Context,
        arguments: &[Term],
        _returns: &mut Vec<Term>,
    ) -> Result<FuzzyChannel> {
        check_argument_number(self, context, arguments)?;
        let arguments = flatten(arguments);
        if arguments.len() % 2 != 0 {
            return Err(ActionError::illegal_argument(
                context.name(),
                "expected pairs of truth and degree",
            ));
        }
        // validated up front, errors must not end up inside the channel
        let mut values = Vec::with_capacity(arguments.len() / 2);
        for pair in arguments.chunks(2) {
            let value = truth(&pair[0]).ok_or_else(|| {
                ActionError::illegal_value(context.name(), "not a truth value", pair[0].to_string())
            })?;
            let degree = pair[1].as_f64().ok_or_else(|| {
                ActionError::illegal_value(context.name(), "not a degree", pair[1].to_string())
            })?;
            values.push(FuzzyValue::new(value, degree));
        }
        Ok(FuzzyChannel::from_values(values))
    }
}
