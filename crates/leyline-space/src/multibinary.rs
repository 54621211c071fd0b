//! Fixed-length boolean vector space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

/// The space of boolean vectors of a fixed length.
///
/// Synthesized from homogeneous boolean list attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiBinary {
    len: usize,
}

impl MultiBinary {
    /// Create the space of boolean vectors of length `len`.
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    /// Vector length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the space holds zero-length vectors only.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `value` is a list of exactly `len` booleans.
    pub fn contains(&self, value: &Value) -> bool {
        matches!(
            value,
            Value::List(items) if items.len() == self.len
                && items.iter().all(|item| matches!(item, Value::Bool(_)))
        )
    }

    /// Draw a uniformly random member.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::List((0..self.len).map(|_| Value::Bool(rng.random())).collect())
    }
}

impl fmt::Display for MultiBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiBinary({})", self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::space::Space;

    #[test]
    fn contains_checks_length_and_kind() {
        let m = MultiBinary::new(2);
        assert!(m.contains(&Value::List(vec![Value::Bool(true), Value::Bool(false)])));
        assert!(!m.contains(&Value::List(vec![Value::Bool(true)])));
        assert!(!m.contains(&Value::List(vec![Value::Bool(true), Value::Int(0)])));
        assert!(!m.contains(&Value::Bool(true)));
    }

    #[test]
    fn full_compliance() {
        compliance::run_full_compliance(&Space::MultiBinary(MultiBinary::new(4)), 5);
    }
}
