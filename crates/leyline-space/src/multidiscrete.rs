//! Per-element bounded integer vector space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

use crate::error::SpaceError;

/// The space of integer vectors with an independent bound per element.
///
/// Element `i` ranges over `{0, ..., bounds[i]-1}`. Synthesized from
/// homogeneous integer list attributes, whose sample values are the
/// per-element cardinality bounds.
///
/// # Examples
///
/// ```
/// use leyline_core::Value;
/// use leyline_space::MultiDiscrete;
///
/// let m = MultiDiscrete::new(vec![3, 5]).unwrap();
/// let v = Value::List(vec![Value::Int(2), Value::Int(4)]);
/// assert!(m.contains(&v));
/// let w = Value::List(vec![Value::Int(3), Value::Int(0)]);
/// assert!(!m.contains(&w));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiDiscrete {
    bounds: Vec<i64>,
}

impl MultiDiscrete {
    /// Create the space with one cardinality bound per element.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::NonPositiveCardinality`] if any bound is
    /// below 1.
    pub fn new(bounds: Vec<i64>) -> Result<Self, SpaceError> {
        if let Some(&value) = bounds.iter().find(|&&b| b < 1) {
            return Err(SpaceError::NonPositiveCardinality { value });
        }
        Ok(Self { bounds })
    }

    /// Per-element cardinality bounds.
    pub fn bounds(&self) -> &[i64] {
        &self.bounds
    }

    /// Whether `value` is an integer list matching length and bounds.
    pub fn contains(&self, value: &Value) -> bool {
        let Value::List(items) = value else {
            return false;
        };
        items.len() == self.bounds.len()
            && items
                .iter()
                .zip(&self.bounds)
                .all(|(item, &bound)| matches!(item, Value::Int(v) if (0..bound).contains(v)))
    }

    /// Draw a uniformly random member.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::List(
            self.bounds
                .iter()
                .map(|&bound| Value::Int(rng.random_range(0..bound)))
                .collect(),
        )
    }
}

impl fmt::Display for MultiDiscrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiDiscrete({:?})", self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::space::Space;

    #[test]
    fn new_rejects_any_non_positive_bound() {
        assert!(matches!(
            MultiDiscrete::new(vec![3, 0, 2]),
            Err(SpaceError::NonPositiveCardinality { value: 0 })
        ));
        assert!(MultiDiscrete::new(vec![1, 1]).is_ok());
    }

    #[test]
    fn contains_checks_elementwise_bounds() {
        let m = MultiDiscrete::new(vec![2, 4]).unwrap();
        assert!(m.contains(&Value::List(vec![Value::Int(1), Value::Int(3)])));
        assert!(!m.contains(&Value::List(vec![Value::Int(2), Value::Int(3)])));
        assert!(!m.contains(&Value::List(vec![Value::Int(1)])));
        assert!(!m.contains(&Value::List(vec![Value::Int(1), Value::Real(3.0)])));
    }

    #[test]
    fn full_compliance() {
        let m = MultiDiscrete::new(vec![2, 7, 3]).unwrap();
        compliance::run_full_compliance(&Space::MultiDiscrete(m), 13);
    }
}
