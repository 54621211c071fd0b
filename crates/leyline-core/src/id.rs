//! Strongly-typed identifiers for agents, nodes, and rounds.

use std::fmt;
use std::num::NonZeroU32;

/// Identifies an agent within an environment session.
///
/// Agent IDs are 1-based and contiguous: a session with `n` live agents
/// uses IDs `1..=n`. The zero value is unrepresentable, so the 1-based
/// invariant holds by construction.
///
/// The simulation engine indexes agents from 0. The only place the two
/// numbering schemes meet is [`engine_index()`](AgentId::engine_index);
/// everything outside the engine contract speaks `AgentId`.
///
/// # Examples
///
/// ```
/// use leyline_core::{AgentId, EngineIndex};
///
/// let first = AgentId::new(1).unwrap();
/// assert_eq!(first.get(), 1);
/// assert_eq!(first.engine_index(), EngineIndex(0));
/// assert!(AgentId::new(0).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(NonZeroU32);

impl AgentId {
    /// Create an agent ID from a 1-based value. Returns `None` for 0.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// The 1-based numeric value.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The 0-based index this agent occupies on the engine side.
    ///
    /// This is the single translation point between the external 1-based
    /// numbering and the engine's 0-based numbering.
    pub fn engine_index(self) -> EngineIndex {
        EngineIndex(self.0.get() - 1)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 0-based agent slot on the engine side of the contract.
///
/// Produced exclusively by [`AgentId::engine_index`]. Engine contract
/// methods accept only `EngineIndex`, never `AgentId`, so an unconverted
/// ID cannot cross the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineIndex(pub u32);

impl fmt::Display for EngineIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a node in the simulation's world graph.
///
/// Node IDs are 0-based: a world with `node_count` nodes uses
/// `NodeId(0)..NodeId(node_count - 1)`. Actions name target nodes, so
/// the action space for a `node_count`-node world is `Discrete(node_count)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing round counter.
///
/// Incremented each time the engine advances one synchronized round.
/// 0 after construction or reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RoundId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
