//! Closed sum of every space shape.

use std::fmt;

use leyline_core::Value;
use rand::Rng;

use crate::boxspace::BoxSpace;
use crate::dict::DictSpace;
use crate::discrete::Discrete;
use crate::flag::Flag;
use crate::graph::GraphSpace;
use crate::multibinary::MultiBinary;
use crate::multidiscrete::MultiDiscrete;
use crate::sequence::SequenceSpace;
use crate::text::TextSpace;
use crate::tuple::TupleSpace;

/// Any space shape, leaf or composite.
///
/// Composite spaces ([`DictSpace`], [`TupleSpace`], [`SequenceSpace`])
/// hold `Space` children, so a full observation schema is one `Space`
/// tree. Membership and sampling delegate to the wrapped shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Space {
    /// Boolean-valued leaf.
    Flag(Flag),
    /// Bounded non-negative integer leaf.
    Discrete(Discrete),
    /// Real scalar or vector leaf.
    Box(BoxSpace),
    /// Fixed-length boolean vector leaf.
    MultiBinary(MultiBinary),
    /// Per-element bounded integer vector leaf.
    MultiDiscrete(MultiDiscrete),
    /// Bounded-length text leaf.
    Text(TextSpace),
    /// Fixed-arity heterogeneous product.
    Tuple(TupleSpace),
    /// Labeled, ordered product.
    Dict(DictSpace),
    /// Variable-length homogeneous sequence.
    Sequence(SequenceSpace),
    /// Node-link graph.
    Graph(GraphSpace),
}

impl Space {
    /// Whether `value` inhabits this space.
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Space::Flag(s) => s.contains(value),
            Space::Discrete(s) => s.contains(value),
            Space::Box(s) => s.contains(value),
            Space::MultiBinary(s) => s.contains(value),
            Space::MultiDiscrete(s) => s.contains(value),
            Space::Text(s) => s.contains(value),
            Space::Tuple(s) => s.contains(value),
            Space::Dict(s) => s.contains(value),
            Space::Sequence(s) => s.contains(value),
            Space::Graph(s) => s.contains(value),
        }
    }

    /// Draw a member of this space.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self {
            Space::Flag(s) => s.sample(rng),
            Space::Discrete(s) => s.sample(rng),
            Space::Box(s) => s.sample(rng),
            Space::MultiBinary(s) => s.sample(rng),
            Space::MultiDiscrete(s) => s.sample(rng),
            Space::Text(s) => s.sample(rng),
            Space::Tuple(s) => s.sample(rng),
            Space::Dict(s) => s.sample(rng),
            Space::Sequence(s) => s.sample(rng),
            Space::Graph(s) => s.sample(rng),
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Flag(s) => s.fmt(f),
            Space::Discrete(s) => s.fmt(f),
            Space::Box(s) => s.fmt(f),
            Space::MultiBinary(s) => s.fmt(f),
            Space::MultiDiscrete(s) => s.fmt(f),
            Space::Text(s) => s.fmt(f),
            Space::Tuple(s) => s.fmt(f),
            Space::Dict(s) => s.fmt(f),
            Space::Sequence(s) => s.fmt(f),
            Space::Graph(s) => s.fmt(f),
        }
    }
}

impl From<Flag> for Space {
    fn from(s: Flag) -> Self {
        Space::Flag(s)
    }
}

impl From<Discrete> for Space {
    fn from(s: Discrete) -> Self {
        Space::Discrete(s)
    }
}

impl From<BoxSpace> for Space {
    fn from(s: BoxSpace) -> Self {
        Space::Box(s)
    }
}

impl From<MultiBinary> for Space {
    fn from(s: MultiBinary) -> Self {
        Space::MultiBinary(s)
    }
}

impl From<MultiDiscrete> for Space {
    fn from(s: MultiDiscrete) -> Self {
        Space::MultiDiscrete(s)
    }
}

impl From<TextSpace> for Space {
    fn from(s: TextSpace) -> Self {
        Space::Text(s)
    }
}

impl From<TupleSpace> for Space {
    fn from(s: TupleSpace) -> Self {
        Space::Tuple(s)
    }
}

impl From<DictSpace> for Space {
    fn from(s: DictSpace) -> Self {
        Space::Dict(s)
    }
}

impl From<SequenceSpace> for Space {
    fn from(s: SequenceSpace) -> Self {
        Space::Sequence(s)
    }
}

impl From<GraphSpace> for Space {
    fn from(s: GraphSpace) -> Self {
        Space::Graph(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // ── Strategies ──────────────────────────────────────────────────────

    fn arb_leaf() -> impl Strategy<Value = Space> {
        prop_oneof![
            Just(Space::Flag(Flag)),
            (1i64..16).prop_map(|n| Space::Discrete(Discrete::new(n).unwrap())),
            (-8.0f64..0.0, 0.0f64..8.0)
                .prop_map(|(lo, hi)| Space::Box(BoxSpace::scalar(lo, hi).unwrap())),
            (1usize..4, -8.0f64..0.0, 0.0f64..8.0)
                .prop_map(|(len, lo, hi)| Space::Box(BoxSpace::vector(len, lo, hi).unwrap())),
            (0usize..4).prop_map(|len| Space::MultiBinary(MultiBinary::new(len))),
            prop::collection::vec(1i64..8, 1..4)
                .prop_map(|bounds| Space::MultiDiscrete(MultiDiscrete::new(bounds).unwrap())),
            (0usize..8).prop_map(|n| Space::Text(TextSpace::new(n))),
            Just(Space::Graph(GraphSpace::planar())),
        ]
    }

    fn arb_space() -> impl Strategy<Value = Space> {
        arb_leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4)
                    .prop_map(|elements| Space::Tuple(TupleSpace::new(elements))),
                prop::collection::vec(inner.clone(), 1..4).prop_map(|elements| {
                    let entries = elements
                        .into_iter()
                        .enumerate()
                        .map(|(i, space)| (format!("k{i}"), space))
                        .collect();
                    Space::Dict(DictSpace::new(entries).unwrap())
                }),
                inner.prop_map(|element| Space::Sequence(SequenceSpace::new(element))),
            ]
        })
    }

    // ── Tests ───────────────────────────────────────────────────────────

    #[test]
    fn delegation_matches_the_wrapped_shape() {
        let space = Space::from(Discrete::new(3).unwrap());
        assert!(space.contains(&Value::Int(2)));
        assert!(!space.contains(&Value::Int(3)));
        assert_eq!(space.to_string(), "Discrete(3)");
    }

    #[test]
    fn from_wraps_each_shape() {
        assert!(matches!(Space::from(Flag), Space::Flag(_)));
        assert!(matches!(
            Space::from(TextSpace::new(4)),
            Space::Text(_)
        ));
        assert!(matches!(Space::from(GraphSpace::planar()), Space::Graph(_)));
    }

    proptest! {
        #[test]
        fn samples_inhabit_their_space(space in arb_space(), seed in 0u64..1024) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let value = space.sample(&mut rng);
            prop_assert!(
                space.contains(&value),
                "sample {value:?} escaped {space}",
            );
        }

        #[test]
        fn display_is_nonempty(space in arb_space()) {
            prop_assert!(!space.to_string().is_empty());
        }
    }
}
