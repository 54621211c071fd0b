//! Length-bounded text space.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

/// The space of strings of at most `max_len` characters.
///
/// Synthesized from text node attributes, whose sample length is the
/// bound. A bound of 0 describes the empty-string-only space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSpace {
    max_len: usize,
}

impl TextSpace {
    /// Create the space of strings up to `max_len` characters.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Maximum character count.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Whether `value` is text within the length bound.
    ///
    /// Length is counted in characters, not bytes.
    pub fn contains(&self, value: &Value) -> bool {
        matches!(value, Value::Text(s) if s.chars().count() <= self.max_len)
    }

    /// Draw random lowercase text with a uniformly random length.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let len = rng.random_range(0..=self.max_len);
        let text: String = (0..len)
            .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
            .collect();
        Value::Text(text)
    }
}

impl fmt::Display for TextSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({})", self.max_len)
    }
}
