//! Environment configuration, validation, and construction errors.
//!
//! [`EnvConfig`] is the caller-side input for constructing a
//! [`ParallelEnv`](crate::ParallelEnv). [`validate()`](EnvConfig::validate)
//! checks the adapter-side invariants; the constructor additionally
//! checks the engine-reported [`ScenarioConfig`](leyline_core::ScenarioConfig)
//! against the adapter's bounds before any world is built.

use std::error::Error;
use std::fmt;

use leyline_core::{EngineError, NodeId, ScenarioConfig, SchemaError};

/// Default upper bound on concurrent agents.
pub const DEFAULT_MAX_AGENTS: u32 = 16;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while constructing a [`ParallelEnv`](crate::ParallelEnv).
///
/// Any construction error is fatal: the environment never comes up with
/// a partial schema or an out-of-bounds scenario.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The scenario name is empty.
    EmptyScenarioName,
    /// `max_agents` is zero, so no agent could ever be live.
    ZeroMaxAgents,
    /// The scenario spawns no agents.
    NoAgents,
    /// The scenario spawns more agents than the configured possible set.
    TooManyAgents {
        /// Agents the scenario spawns.
        n_agents: u32,
        /// Upper bound of the possible set.
        max_agents: u32,
    },
    /// The scenario's world has no nodes.
    EmptyWorld,
    /// The scenario's start-node count differs from its agent count.
    StartArity {
        /// Number of start nodes reported.
        starts: usize,
        /// Number of agents the scenario spawns.
        n_agents: u32,
    },
    /// A start node indexes beyond the world's node count.
    StartOutOfRange {
        /// The offending start node.
        start: NodeId,
        /// Node count of the world.
        node_count: u32,
    },
    /// Schema synthesis from the node-value probe failed.
    Schema(SchemaError),
    /// An engine call failed during construction.
    Engine(EngineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyScenarioName => write!(f, "scenario name is empty"),
            Self::ZeroMaxAgents => write!(f, "max_agents must be at least 1"),
            Self::NoAgents => write!(f, "scenario spawns no agents"),
            Self::TooManyAgents {
                n_agents,
                max_agents,
            } => {
                write!(
                    f,
                    "scenario spawns {n_agents} agents, exceeding max_agents {max_agents}"
                )
            }
            Self::EmptyWorld => write!(f, "scenario world has no nodes"),
            Self::StartArity { starts, n_agents } => {
                write!(f, "{starts} start nodes for {n_agents} agents")
            }
            Self::StartOutOfRange { start, node_count } => {
                write!(f, "start node {start} outside 0..{node_count}")
            }
            Self::Schema(e) => write!(f, "schema synthesis: {e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SchemaError> for ConfigError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<EngineError> for ConfigError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Adapter-side configuration for a [`ParallelEnv`](crate::ParallelEnv).
///
/// Everything else about the session (world path, agent count, start
/// nodes) comes from the engine's scenario, resolved once at
/// construction and reused verbatim by every reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    /// Scenario name passed to the engine's `load_scenario`.
    pub scenario: String,
    /// Upper bound on concurrent agents; the possible-agent set is
    /// `1..=max_agents` regardless of how many the scenario spawns.
    pub max_agents: u32,
}

impl EnvConfig {
    /// A configuration for `scenario` with [`DEFAULT_MAX_AGENTS`].
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            max_agents: DEFAULT_MAX_AGENTS,
        }
    }

    /// Validate the adapter-side invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The scenario name must resolve to something.
        if self.scenario.is_empty() {
            return Err(ConfigError::EmptyScenarioName);
        }
        // 2. An empty possible set admits no live agents.
        if self.max_agents == 0 {
            return Err(ConfigError::ZeroMaxAgents);
        }
        Ok(())
    }

    /// Validate an engine-reported scenario against this configuration.
    pub(crate) fn validate_scenario(&self, scenario: &ScenarioConfig) -> Result<(), ConfigError> {
        // 1. Live agents must be a non-empty prefix of the possible set.
        if scenario.n_agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        if scenario.n_agents > self.max_agents {
            return Err(ConfigError::TooManyAgents {
                n_agents: scenario.n_agents,
                max_agents: self.max_agents,
            });
        }
        // 2. Actions target nodes, so there must be at least one.
        if scenario.node_count == 0 {
            return Err(ConfigError::EmptyWorld);
        }
        // 3. One start node per agent, each naming an existing node.
        if scenario.agent_starts.len() != scenario.n_agents as usize {
            return Err(ConfigError::StartArity {
                starts: scenario.agent_starts.len(),
                n_agents: scenario.n_agents,
            });
        }
        if let Some(&start) = scenario
            .agent_starts
            .iter()
            .find(|s| s.0 >= scenario.node_count)
        {
            return Err(ConfigError::StartOutOfRange {
                start,
                node_count: scenario.node_count,
            });
        }
        Ok(())
    }
}
