//! Named types the runtime knows about.
//!
//! Type names used by type checking actions are resolved through an explicit
//! [`TypeRegistry`] which maps canonical names to membership predicates. The
//! runtime seeds it at startup (usually with [`TypeRegistry::with_builtin_types`])
//! and may register its own types on top.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::{Arc, Mutex, PoisonError};

// used to print out readable forms of a descriptor
use std::fmt;

use seahash::SeaHasher;
use thiserror::Error;
use tracing::debug;

use crate::term::Value;

pub type NameHasher = BuildHasherDefault<SeaHasher>;
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Type not found: {0}")]
pub struct TypeNotFound(pub String);

// ------------- TypeDescriptor -------------
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    predicate: Predicate,
}

impl TypeDescriptor {
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: canonical(name),
            predicate: Arc::new(predicate),
        }
    }
    /// One of the types every registry created by `with_builtin_types` knows.
    pub fn builtin(name: &str) -> Option<Self> {
        let name = canonical(name);
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(builtin, predicate)| Self {
                name: (*builtin).to_owned(),
                predicate: Arc::new(*predicate),
            })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// True when a value of the given runtime kind is assignable to this type.
    pub fn accepts(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}
impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.name)
    }
}
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn canonical(name: &str) -> String {
    name.trim().to_lowercase()
}

const BUILTIN: &[(&str, fn(&Value) -> bool)] = &[
    ("any", |_| true),
    ("null", |v| matches!(v, Value::Null)),
    ("boolean", |v| matches!(v, Value::Boolean(_))),
    ("integer", |v| matches!(v, Value::Integer(_))),
    ("float", |v| matches!(v, Value::Float(_))),
    ("number", |v| matches!(v, Value::Integer(_) | Value::Float(_))),
    ("character", |v| matches!(v, Value::Character(_))),
    ("string", |v| matches!(v, Value::String(_))),
    ("text", |v| matches!(v, Value::String(_) | Value::Character(_))),
    ("list", |v| matches!(v, Value::List(_))),
    ("literal", |v| matches!(v, Value::Literal(_))),
];

// ------------- TypeRegistry -------------
/// Read-mostly: lookups work on a snapshot, registration swaps in a new map.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    kept: Mutex<Arc<HashMap<String, TypeDescriptor, NameHasher>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_builtin_types() -> Self {
        let registry = Self::new();
        for (name, _) in BUILTIN {
            if let Some(descriptor) = TypeDescriptor::builtin(name) {
                registry.register(descriptor);
            }
        }
        registry
    }
    fn snapshot(&self) -> Arc<HashMap<String, TypeDescriptor, NameHasher>> {
        Arc::clone(&self.kept.lock().unwrap_or_else(PoisonError::into_inner))
    }
    /// Registers a type, returning the kept descriptor and whether the name was
    /// previously known. A known name keeps its first descriptor.
    pub fn register(&self, descriptor: TypeDescriptor) -> (TypeDescriptor, bool) {
        let mut kept = self.kept.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = kept.get(descriptor.name()) {
            return (previous.clone(), true);
        }
        debug!(name = descriptor.name(), "registering type");
        let mut map = (**kept).clone();
        map.insert(descriptor.name().to_owned(), descriptor.clone());
        *kept = Arc::new(map);
        (descriptor, false)
    }
    pub fn resolve(&self, name: &str) -> std::result::Result<TypeDescriptor, TypeNotFound> {
        self.snapshot()
            .get(&canonical(name))
            .cloned()
            .ok_or_else(|| TypeNotFound(name.to_owned()))
    }
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.snapshot().keys().cloned().collect();
        names.sort();
        names
    }
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
