//! Variable-length homogeneous sequence space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

use crate::space::Space;

/// Longest sequence [`SequenceSpace::sample`] will draw.
const MAX_SAMPLE_LEN: usize = 8;

/// A variable-length sequence whose elements all inhabit one space.
///
/// Length is unconstrained, including zero. The element space is
/// typically a [`DictSpace`](crate::DictSpace) describing one record of
/// a collection whose size is only known at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceSpace {
    element: Box<Space>,
}

impl SequenceSpace {
    /// Create a sequence of `element`-space members.
    pub fn new(element: Space) -> Self {
        Self {
            element: Box::new(element),
        }
    }

    /// The per-element space.
    pub fn element(&self) -> &Space {
        &self.element
    }

    /// Whether `value` is a list whose every item inhabits the element
    /// space. The empty list is a member.
    pub fn contains(&self, value: &Value) -> bool {
        let Value::List(items) = value else {
            return false;
        };
        items.iter().all(|item| self.element.contains(item))
    }

    /// Draw a member of random length in `0..=MAX_SAMPLE_LEN`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let len = rng.random_range(0..=MAX_SAMPLE_LEN);
        Value::List((0..len).map(|_| self.element.sample(rng)).collect())
    }
}

impl fmt::Display for SequenceSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence<{}>", self.element)
    }
}
