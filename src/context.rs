// used to share the fuzzy semantics and type registry between many contexts
use std::sync::Arc;

use crate::fuzzy::{
    CrispMembership, Defuzzification, FuzzyChannel, MaximumDefuzzification, Membership,
};
use crate::types::{TypeDescriptor, TypeNotFound, TypeRegistry};

/// Everything an action may ask of the engine that invokes it. Contexts are
/// cheap to clone and shared between concurrent calls.
#[derive(Clone)]
pub struct Context {
    name: Arc<str>,
    membership: Arc<dyn Membership>,
    defuzzification: Arc<dyn Defuzzification>,
    types: Arc<TypeRegistry>,
}

impl Context {
    pub fn new(
        name: &str,
        membership: Arc<dyn Membership>,
        defuzzification: Arc<dyn Defuzzification>,
        types: Arc<TypeRegistry>,
    ) -> Self {
        Self {
            name: Arc::from(name),
            membership,
            defuzzification,
            types,
        }
    }
    /// A context outside of any plan: crisp truth and the builtin types.
    pub fn empty() -> Self {
        Self::new(
            "empty plan",
            Arc::new(CrispMembership),
            Arc::new(MaximumDefuzzification),
            Arc::new(TypeRegistry::with_builtin_types()),
        )
    }
    /// The same capabilities under another name, e.g. per plan step.
    pub fn named(&self, name: &str) -> Self {
        Self {
            name: Arc::from(name),
            ..self.clone()
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn membership(&self) -> &dyn Membership {
        self.membership.as_ref()
    }
    pub fn success(&self) -> FuzzyChannel {
        self.membership.success()
    }
    pub fn fail(&self) -> FuzzyChannel {
        self.membership.fail()
    }
    pub fn verdict(&self, held: bool) -> FuzzyChannel {
        self.membership.verdict(held)
    }
    pub fn defuzzify(&self, channel: FuzzyChannel) -> bool {
        self.defuzzification.defuzzify(channel)
    }
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }
    pub fn resolve_type(&self, name: &str) -> std::result::Result<TypeDescriptor, TypeNotFound> {
        self.types.resolve(name)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Context({})", self.name)
    }
}
