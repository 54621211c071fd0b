//! Sample-value classification.
//!
//! One node attribute sample maps to one [`ValueClass`]. Rules apply in
//! strict order, first match wins: the boolean and integer checks come
//! before the generic numeric check so a flag is never misread as a
//! bounded integer.
//!
//! Samples encode shape, not data. An integer sample is a cardinality
//! bound, a text sample's length is a length bound, and an integer
//! array's values are per-element bounds. The sampled value itself is
//! usually *not* a member of the space it classifies into.

use leyline_core::{ClassifyError, Value, ValueKind};
use leyline_space::{
    BoxSpace, Discrete, Flag, MultiBinary, MultiDiscrete, Space, TextSpace, TupleSpace,
};

/// Classification of one node attribute sample.
///
/// The closed set of recognized shapes. Construction goes through
/// [`classify`], which validates bounds; [`into_space`](Self::into_space)
/// is therefore infallible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueClass {
    /// A boolean sample.
    Flag,
    /// An integer sample, read as the cardinality bound of `{0, ..., n-1}`.
    BoundedInt {
        /// The cardinality bound, at least 1.
        n: i64,
    },
    /// A real sample.
    Real,
    /// A text sample, read as a maximum-length bound.
    Text {
        /// Length of the sample in characters.
        max_len: usize,
    },
    /// A homogeneous integer list, read as per-element cardinality bounds.
    MultiDiscrete {
        /// One bound per element, each at least 1.
        bounds: Vec<i64>,
    },
    /// A homogeneous real list, read as an unbounded vector shape.
    Box {
        /// Number of elements.
        len: usize,
    },
    /// A homogeneous boolean list.
    MultiBinary {
        /// Number of elements.
        len: usize,
    },
    /// A homogeneous text list, read as per-element length bounds.
    TupleOfText {
        /// One length bound per element, in characters.
        max_lens: Vec<usize>,
    },
}

impl ValueClass {
    /// Build the space this classification describes.
    pub fn into_space(self) -> Space {
        match self {
            Self::Flag => Space::Flag(Flag),
            Self::BoundedInt { n } => Space::Discrete(
                Discrete::new(n).expect("classification rejects non-positive bounds"),
            ),
            Self::Real => Space::Box(BoxSpace::unbounded_scalar()),
            Self::Text { max_len } => Space::Text(TextSpace::new(max_len)),
            Self::MultiDiscrete { bounds } => Space::MultiDiscrete(
                MultiDiscrete::new(bounds).expect("classification rejects non-positive bounds"),
            ),
            Self::Box { len } => Space::Box(BoxSpace::unbounded_vector(len)),
            Self::MultiBinary { len } => Space::MultiBinary(MultiBinary::new(len)),
            Self::TupleOfText { max_lens } => Space::Tuple(TupleSpace::new(
                max_lens
                    .into_iter()
                    .map(|n| Space::Text(TextSpace::new(n)))
                    .collect(),
            )),
        }
    }
}

/// Classify one sample value.
///
/// # Errors
///
/// [`ClassifyError::NonPositiveBound`] for an integer bound below 1,
/// [`ClassifyError::EmptyList`] for a list with no elements,
/// [`ClassifyError::MixedList`] for a list whose elements disagree on
/// kind, and [`ClassifyError::UnsupportedKind`] /
/// [`ClassifyError::UnsupportedElement`] for shapes outside the
/// recognized set (dicts, graphs, nested lists).
///
/// # Examples
///
/// ```
/// use leyline_core::Value;
/// use leyline_obs::{classify, ValueClass};
///
/// assert_eq!(classify(&Value::Bool(true)), Ok(ValueClass::Flag));
/// assert_eq!(classify(&Value::Int(4)), Ok(ValueClass::BoundedInt { n: 4 }));
/// assert!(classify(&Value::Int(0)).is_err());
/// ```
pub fn classify(sample: &Value) -> Result<ValueClass, ClassifyError> {
    match sample {
        Value::Bool(_) => Ok(ValueClass::Flag),
        Value::Int(n) if *n >= 1 => Ok(ValueClass::BoundedInt { n: *n }),
        Value::Int(n) => Err(ClassifyError::NonPositiveBound {
            value: *n,
            index: None,
        }),
        Value::Real(_) => Ok(ValueClass::Real),
        Value::Text(s) => Ok(ValueClass::Text {
            max_len: s.chars().count(),
        }),
        Value::List(items) => classify_list(items),
        Value::Dict(_) | Value::Graph(_) => Err(ClassifyError::UnsupportedKind {
            kind: sample.kind(),
        }),
    }
}

/// Classify a list sample by its first element's kind.
///
/// The first element fixes the expected kind; every later element must
/// match it exactly. Element payloads are extracted in the same pass, so
/// a mixed list is reported with the index where it first diverges.
fn classify_list(items: &[Value]) -> Result<ValueClass, ClassifyError> {
    let first = items.first().ok_or(ClassifyError::EmptyList)?;
    match first.kind() {
        ValueKind::Int => {
            let mut bounds = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::Int(n) if *n >= 1 => bounds.push(*n),
                    Value::Int(n) => {
                        return Err(ClassifyError::NonPositiveBound {
                            value: *n,
                            index: Some(index),
                        })
                    }
                    other => return Err(mixed(ValueKind::Int, other, index)),
                }
            }
            Ok(ValueClass::MultiDiscrete { bounds })
        }
        ValueKind::Real => {
            for (index, item) in items.iter().enumerate() {
                if !matches!(item, Value::Real(_)) {
                    return Err(mixed(ValueKind::Real, item, index));
                }
            }
            Ok(ValueClass::Box { len: items.len() })
        }
        ValueKind::Bool => {
            for (index, item) in items.iter().enumerate() {
                if !matches!(item, Value::Bool(_)) {
                    return Err(mixed(ValueKind::Bool, item, index));
                }
            }
            Ok(ValueClass::MultiBinary { len: items.len() })
        }
        ValueKind::Text => {
            let mut max_lens = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::Text(s) => max_lens.push(s.chars().count()),
                    other => return Err(mixed(ValueKind::Text, other, index)),
                }
            }
            Ok(ValueClass::TupleOfText { max_lens })
        }
        ValueKind::List | ValueKind::Dict | ValueKind::Graph => {
            Err(ClassifyError::UnsupportedElement { kind: first.kind() })
        }
    }
}

fn mixed(expected: ValueKind, found: &Value, index: usize) -> ClassifyError {
    ClassifyError::MixedList {
        expected,
        found: found.kind(),
        index,
    }
}
