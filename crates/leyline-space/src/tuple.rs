//! Heterogeneous fixed-arity product space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

use crate::space::Space;

/// The product of a fixed sequence of element spaces.
///
/// Contains lists whose length matches the arity and whose `i`-th
/// element inhabits the `i`-th space. Synthesized from homogeneous text
/// list attributes (a tuple of per-element text spaces) and available
/// for general composition.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleSpace {
    elements: Vec<Space>,
}

impl TupleSpace {
    /// Create the product of `elements`, in order.
    pub fn new(elements: Vec<Space>) -> Self {
        Self { elements }
    }

    /// Element spaces, in order.
    pub fn elements(&self) -> &[Space] {
        &self.elements
    }

    /// Arity of the product.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the product is empty (contains only the empty list).
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `value` is a list matching arity and element spaces.
    pub fn contains(&self, value: &Value) -> bool {
        let Value::List(items) = value else {
            return false;
        };
        items.len() == self.elements.len()
            && items
                .iter()
                .zip(&self.elements)
                .all(|(item, space)| space.contains(item))
    }

    /// Draw a member by sampling each element space in order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::List(self.elements.iter().map(|s| s.sample(rng)).collect())
    }
}

impl fmt::Display for TupleSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tuple[")?;
        for (i, space) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{space}")?;
        }
        write!(f, "]")
    }
}
