//! Bounded integer space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

use crate::error::SpaceError;

/// The space of integers `{0, ..., n-1}`.
///
/// Synthesized from integer node attributes, where the sample value is
/// the cardinality bound, and used as the action space of a
/// `node_count`-node world.
///
/// # Examples
///
/// ```
/// use leyline_core::Value;
/// use leyline_space::Discrete;
///
/// let d = Discrete::new(4).unwrap();
/// assert!(d.contains(&Value::Int(3)));
/// assert!(!d.contains(&Value::Int(4)));
/// assert!(Discrete::new(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discrete {
    n: i64,
}

impl Discrete {
    /// Create the space `{0, ..., n-1}`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NonPositiveCardinality`] if `n < 1`: an
    /// empty discrete space cannot admit any value.
    pub fn new(n: i64) -> Result<Self, SpaceError> {
        if n < 1 {
            return Err(SpaceError::NonPositiveCardinality { value: n });
        }
        Ok(Self { n })
    }

    /// The cardinality bound.
    pub fn n(&self) -> i64 {
        self.n
    }

    /// Whether `value` is an integer in `[0, n)`.
    pub fn contains(&self, value: &Value) -> bool {
        matches!(value, Value::Int(v) if (0..self.n).contains(v))
    }

    /// Draw a uniformly random member.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::Int(rng.random_range(0..self.n))
    }
}

impl fmt::Display for Discrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discrete({})", self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::space::Space;

    #[test]
    fn new_rejects_non_positive_bounds() {
        assert!(matches!(
            Discrete::new(0),
            Err(SpaceError::NonPositiveCardinality { value: 0 })
        ));
        assert!(matches!(
            Discrete::new(-3),
            Err(SpaceError::NonPositiveCardinality { value: -3 })
        ));
        assert!(Discrete::new(1).is_ok());
    }

    #[test]
    fn contains_half_open_range() {
        let d = Discrete::new(4).unwrap();
        assert!(d.contains(&Value::Int(0)));
        assert!(d.contains(&Value::Int(3)));
        assert!(!d.contains(&Value::Int(-1)));
        assert!(!d.contains(&Value::Int(4)));
        assert!(!d.contains(&Value::Real(2.0)));
        assert!(!d.contains(&Value::Bool(true)));
    }

    #[test]
    fn full_compliance() {
        compliance::run_full_compliance(&Space::Discrete(Discrete::new(5).unwrap()), 11);
    }

    #[test]
    fn display_names_bound() {
        assert_eq!(Discrete::new(7).unwrap().to_string(), "Discrete(7)");
    }
}
