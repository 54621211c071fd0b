//! Real-valued scalar and vector space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

use crate::error::SpaceError;

/// The space of reals (scalar) or fixed-length real vectors.
///
/// Bounds are uniform across elements. Synthesized boxes are unbounded;
/// bounded construction exists for callers that know their ranges.
///
/// A scalar box contains `Value::Real`; a vector box of length `n`
/// contains a `Value::List` of exactly `n` reals. NaN is never a
/// member; infinities are members when the matching bound is infinite.
///
/// # Examples
///
/// ```
/// use leyline_core::Value;
/// use leyline_space::BoxSpace;
///
/// let position = BoxSpace::unbounded_vector(2);
/// let v = Value::List(vec![Value::Real(1.5), Value::Real(-3.0)]);
/// assert!(position.contains(&v));
/// assert!(!position.contains(&Value::Real(1.5)));
///
/// let unit = BoxSpace::scalar(0.0, 1.0).unwrap();
/// assert!(unit.contains(&Value::Real(0.5)));
/// assert!(!unit.contains(&Value::Real(2.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpace {
    low: f64,
    high: f64,
    len: Option<usize>,
}

impl BoxSpace {
    /// An unbounded scalar box.
    pub fn unbounded_scalar() -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
            len: None,
        }
    }

    /// An unbounded vector box of length `len`.
    pub fn unbounded_vector(len: usize) -> Self {
        Self {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
            len: Some(len),
        }
    }

    /// A bounded scalar box over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::InvalidBounds`] if a bound is NaN or
    /// `low > high`.
    pub fn scalar(low: f64, high: f64) -> Result<Self, SpaceError> {
        Self::check_bounds(low, high)?;
        Ok(Self {
            low,
            high,
            len: None,
        })
    }

    /// A bounded vector box of length `len` over `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::InvalidBounds`] if a bound is NaN or
    /// `low > high`.
    pub fn vector(len: usize, low: f64, high: f64) -> Result<Self, SpaceError> {
        Self::check_bounds(low, high)?;
        Ok(Self {
            low,
            high,
            len: Some(len),
        })
    }

    fn check_bounds(low: f64, high: f64) -> Result<(), SpaceError> {
        if low.is_nan() || high.is_nan() || low > high {
            return Err(SpaceError::InvalidBounds { low, high });
        }
        Ok(())
    }

    /// Lower bound, uniform across elements.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound, uniform across elements.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Vector length, or `None` for a scalar box.
    pub fn len(&self) -> Option<usize> {
        self.len
    }

    /// Whether this is a scalar box.
    pub fn is_scalar(&self) -> bool {
        self.len.is_none()
    }

    fn in_range(&self, v: f64) -> bool {
        // NaN fails both comparisons.
        v >= self.low && v <= self.high
    }

    /// Whether `value` matches this box's rank, length, and bounds.
    pub fn contains(&self, value: &Value) -> bool {
        match (self.len, value) {
            (None, Value::Real(v)) => self.in_range(*v),
            (Some(len), Value::List(items)) => {
                items.len() == len
                    && items
                        .iter()
                        .all(|item| matches!(item, Value::Real(v) if self.in_range(*v)))
            }
            _ => false,
        }
    }

    /// Draw a random member.
    ///
    /// Bounded intervals sample uniformly. Unbounded sides sample from
    /// a standard normal, reflected into the feasible half-line when
    /// one bound is finite.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self.len {
            None => Value::Real(self.sample_element(rng)),
            Some(len) => Value::List(
                (0..len)
                    .map(|_| Value::Real(self.sample_element(rng)))
                    .collect(),
            ),
        }
    }

    pub(crate) fn sample_element<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match (self.low.is_finite(), self.high.is_finite()) {
            (true, true) => rng.random_range(self.low..=self.high),
            (true, false) => self.low + standard_normal(rng).abs(),
            (false, true) => self.high - standard_normal(rng).abs(),
            (false, false) => standard_normal(rng),
        }
    }
}

impl fmt::Display for BoxSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len {
            None => write!(f, "Box(scalar)"),
            Some(len) => write!(f, "Box({len})"),
        }
    }
}

/// Box-Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
