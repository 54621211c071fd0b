//! Ordered labeled product space.

use std::fmt;

use indexmap::IndexMap;
use leyline_core::{Value, ValueBundle};
use rand::Rng;

use crate::error::SpaceError;
use crate::space::Space;

/// A product space with labeled, ordered entries.
///
/// Label order is part of the space's identity: membership requires a
/// bundle to carry exactly the schema's labels *in the schema's order*.
/// A bundle with the right labels misordered is not a member, because
/// consumers flatten observations positionally.
///
/// # Examples
///
/// ```
/// use leyline_core::{Value, ValueBundle};
/// use leyline_space::{DictSpace, Discrete, Flag, Space};
///
/// let d = DictSpace::new(vec![
///     ("is_blocked".to_string(), Space::Flag(Flag)),
///     ("capacity".to_string(), Space::Discrete(Discrete::new(4).unwrap())),
/// ]).unwrap();
///
/// let mut bundle = ValueBundle::new();
/// bundle.insert("is_blocked".to_string(), Value::Bool(false));
/// bundle.insert("capacity".to_string(), Value::Int(2));
/// assert!(d.contains(&Value::Dict(bundle)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DictSpace {
    entries: IndexMap<String, Space>,
}

impl DictSpace {
    /// Create a labeled product from `(label, space)` pairs, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::DuplicateLabel`] if a label repeats.
    pub fn new(entries: Vec<(String, Space)>) -> Result<Self, SpaceError> {
        let mut map = IndexMap::with_capacity(entries.len());
        for (label, space) in entries {
            if map.insert(label.clone(), space).is_some() {
                return Err(SpaceError::DuplicateLabel { label });
            }
        }
        Ok(Self { entries: map })
    }

    /// The space registered under `label`, if any.
    pub fn get(&self, label: &str) -> Option<&Space> {
        self.entries.get(label)
    }

    /// Labels in schema order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(label, space)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Space)> {
        self.entries.iter().map(|(label, space)| (label.as_str(), space))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the product has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `value` is a bundle with exactly these labels, in this
    /// order, each value inhabiting its labeled space.
    pub fn contains(&self, value: &Value) -> bool {
        let Value::Dict(bundle) = value else {
            return false;
        };
        if bundle.len() != self.entries.len() {
            return false;
        }
        bundle
            .iter()
            .zip(&self.entries)
            .all(|((key, item), (label, space))| key == label && space.contains(item))
    }

    /// Draw a member by sampling each entry in order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let mut bundle = ValueBundle::with_capacity(self.entries.len());
        for (label, space) in &self.entries {
            bundle.insert(label.clone(), space.sample(rng));
        }
        Value::Dict(bundle)
    }
}

impl fmt::Display for DictSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dict{{")?;
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::{Discrete, Flag};

    fn two_entry() -> DictSpace {
        DictSpace::new(vec![
            ("a".to_string(), Space::Flag(Flag)),
            ("b".to_string(), Space::Discrete(Discrete::new(3).unwrap())),
        ])
        .unwrap()
    }

    fn bundle(pairs: &[(&str, Value)]) -> Value {
        Value::Dict(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn new_rejects_duplicate_labels() {
        let result = DictSpace::new(vec![
            ("a".to_string(), Space::Flag(Flag)),
            ("a".to_string(), Space::Flag(Flag)),
        ]);
        assert!(matches!(result, Err(SpaceError::DuplicateLabel { .. })));
    }

    #[test]
    fn contains_requires_exact_labels() {
        let d = two_entry();
        assert!(d.contains(&bundle(&[
            ("a", Value::Bool(true)),
            ("b", Value::Int(0)),
        ])));
        // Missing label.
        assert!(!d.contains(&bundle(&[("a", Value::Bool(true))])));
        // Undefined label.
        assert!(!d.contains(&bundle(&[
            ("a", Value::Bool(true)),
            ("b", Value::Int(0)),
            ("c", Value::Int(0)),
        ])));
    }

    #[test]
    fn contains_is_order_sensitive() {
        let d = two_entry();
        assert!(!d.contains(&bundle(&[
            ("b", Value::Int(0)),
            ("a", Value::Bool(true)),
        ])));
    }

    #[test]
    fn contains_checks_entry_membership() {
        let d = two_entry();
        assert!(!d.contains(&bundle(&[
            ("a", Value::Bool(true)),
            ("b", Value::Int(3)),
        ])));
    }

    #[test]
    fn full_compliance() {
        compliance::run_full_compliance(&Space::Dict(two_entry()), 23);
    }

    #[test]
    fn display_lists_labels_in_order() {
        assert_eq!(two_entry().to_string(), "Dict{a, b}");
    }
}
