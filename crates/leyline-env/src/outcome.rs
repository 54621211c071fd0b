//! Result of one synchronized round.

use indexmap::IndexMap;

use leyline_core::{AgentId, Value, ValueBundle};

/// The five parallel per-agent maps returned by one `step()` call.
///
/// All five maps share exactly the live-agent key set, in ascending
/// [`AgentId`] order. A missing or extra key in any map is a bug in the
/// session, never something callers need to defend against.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Per-agent observations, each inhabiting the observation tree.
    pub observations: IndexMap<AgentId, Value>,
    /// Per-agent rewards, sourced directly from the engine's round
    /// report. The session performs no reward shaping.
    pub rewards: IndexMap<AgentId, f64>,
    /// Per-agent terminal flags. Always `false`: the engine contract
    /// carries no terminal condition, and episodes run until a
    /// caller-imposed step budget.
    pub terminated: IndexMap<AgentId, bool>,
    /// Per-agent truncation flags. Always `false`, as above.
    pub truncated: IndexMap<AgentId, bool>,
    /// Per-agent auxiliary info. Currently an empty bundle per agent.
    pub infos: IndexMap<AgentId, ValueBundle>,
}

impl StepOutcome {
    /// The shared key set, in ascending agent-ID order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.observations.keys().copied()
    }
}
