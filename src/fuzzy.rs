//! Fuzzy truth values and the result channel actions report them through.
//!
//! An action never decides how "true" a success is. It asks the membership
//! function of its execution context for a `success()` or `fail()` and passes
//! the resulting channel on. Callers that need a crisp answer collapse the
//! channel with a [`Defuzzification`].

// used to print out readable forms of a fuzzy value
use std::fmt;
use std::iter::{self, FusedIterator};

use crate::term::Term;

// ------------- FuzzyValue -------------
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyValue {
    value: bool,
    degree: f64,
}

impl FuzzyValue {
    /// Degrees outside of [0, 1] are clamped into it.
    pub fn new(value: bool, degree: f64) -> Self {
        let degree = if degree.is_nan() {
            0.
        } else {
            degree.clamp(0., 1.)
        };
        Self { value, degree }
    }
    pub fn value(&self) -> bool {
        self.value
    }
    pub fn degree(&self) -> f64 {
        self.degree
    }
    /// The evaluated value as a term, so it can be bound like any other result.
    pub fn term(&self) -> Term {
        Term::from(self.value)
    }
}
impl fmt::Display for FuzzyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.value, self.degree)
    }
}

// ------------- FuzzyChannel -------------
/// A finite, lazily evaluated sequence of fuzzy values. It can be consumed
/// exactly once. An empty channel means the action completed without a verdict.
pub struct FuzzyChannel {
    values: Box<dyn Iterator<Item = FuzzyValue> + Send>,
}

impl FuzzyChannel {
    pub fn empty() -> Self {
        Self {
            values: Box::new(iter::empty()),
        }
    }
    pub fn once(value: FuzzyValue) -> Self {
        Self {
            values: Box::new(iter::once(value)),
        }
    }
    pub fn from_values(values: Vec<FuzzyValue>) -> Self {
        Self {
            values: Box::new(values.into_iter()),
        }
    }
    /// Wraps a lazy producer; values are only computed while the channel is read.
    pub fn lazy<I>(values: I) -> Self
    where
        I: IntoIterator<Item = FuzzyValue>,
        I::IntoIter: Send + 'static,
    {
        Self {
            values: Box::new(values.into_iter().fuse()),
        }
    }
}
impl Iterator for FuzzyChannel {
    type Item = FuzzyValue;
    fn next(&mut self) -> Option<FuzzyValue> {
        self.values.next()
    }
}
impl FusedIterator for FuzzyChannel {}
impl fmt::Debug for FuzzyChannel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FuzzyChannel")
    }
}

// ------------- Membership -------------
/// The fuzzy semantics of an execution context. Actions only ever use the two
/// canonical producers, the magnitudes are the context's business.
pub trait Membership: Send + Sync {
    fn success(&self) -> FuzzyChannel;
    fn fail(&self) -> FuzzyChannel;
    /// Convenience for the common "all of them held" verdict.
    fn verdict(&self, held: bool) -> FuzzyChannel {
        if held { self.success() } else { self.fail() }
    }
}

/// Plain boolean truth: success is `true`, fail is `false`, both fully certain.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrispMembership;

impl Membership for CrispMembership {
    fn success(&self) -> FuzzyChannel {
        FuzzyChannel::once(FuzzyValue::new(true, 1.))
    }
    fn fail(&self) -> FuzzyChannel {
        FuzzyChannel::once(FuzzyValue::new(false, 1.))
    }
}

/// Graded truth: success and fail carry configurable degrees.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdMembership {
    success: f64,
    fail: f64,
}

impl ThresholdMembership {
    pub fn new(success: f64, fail: f64) -> Self {
        Self { success, fail }
    }
}
impl Membership for ThresholdMembership {
    fn success(&self) -> FuzzyChannel {
        FuzzyChannel::once(FuzzyValue::new(true, self.success))
    }
    fn fail(&self) -> FuzzyChannel {
        FuzzyChannel::once(FuzzyValue::new(false, self.fail))
    }
}

// ------------- Defuzzification -------------
pub trait Defuzzification: Send + Sync {
    fn defuzzify(&self, channel: FuzzyChannel) -> bool;
}

/// Looks at the values carrying the highest degree and requires all of them to
/// be true. An empty channel is a structural success and yields `true`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaximumDefuzzification;

impl Defuzzification for MaximumDefuzzification {
    fn defuzzify(&self, channel: FuzzyChannel) -> bool {
        let mut maximum = f64::NEG_INFINITY;
        let mut held = true;
        for value in channel {
            if value.degree() > maximum {
                maximum = value.degree();
                held = value.value();
            } else if value.degree() == maximum {
                held &= value.value();
            }
        }
        held
    }
}
