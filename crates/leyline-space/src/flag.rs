//! Single-bit flag space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

/// The space of boolean flags.
///
/// Contains exactly the two values `Value::Bool(false)` and
/// `Value::Bool(true)`. Synthesized from boolean node attributes.
///
/// # Examples
///
/// ```
/// use leyline_core::Value;
/// use leyline_space::Flag;
///
/// let flag = Flag;
/// assert!(flag.contains(&Value::Bool(true)));
/// assert!(!flag.contains(&Value::Int(1)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flag;

impl Flag {
    /// Whether `value` is a boolean.
    pub fn contains(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    /// Draw a uniformly random flag.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        Value::Bool(rng.random())
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flag")
    }
}
