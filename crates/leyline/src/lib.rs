//! Leyline: a parallel multi-agent environment adapter for stateful
//! simulation engines.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Leyline sub-crates. For most users, adding `leyline` as a
//! single dependency is sufficient.
//!
//! Leyline sits between a simulation engine (anything implementing
//! [`types::Engine`]) and a reinforcement-learning loop: at
//! construction it probes one world node's attribute samples and
//! synthesizes the observation schema; afterwards every synchronized
//! round submits all agents' actions as one batch, advances the world
//! exactly once, and validates every observation against the fixed
//! schema.
//!
//! # Quick start
//!
//! ```rust
//! use leyline::prelude::*;
//!
//! // A probe describes one node's attributes by example: sample values
//! // carry bounds and shapes, not data.
//! let probe = NodeValueProbe {
//!     labels: vec![
//!         "is_blocked".to_string(),
//!         "capacity".to_string(),
//!         "pos".to_string(),
//!     ],
//!     samples: vec![
//!         Value::Bool(false),
//!         Value::Int(4),
//!         Value::List(vec![Value::Real(0.0), Value::Real(0.0)]),
//!     ],
//! };
//!
//! // Synthesis fixes the observation tree for the session's lifetime.
//! let schema = synthesize(&probe).unwrap();
//! let labels: Vec<&str> = schema.node_bundle().labels().collect();
//! assert_eq!(labels, ["is_blocked", "capacity", "pos"]);
//! assert_eq!(schema.node_bundle().get("capacity").unwrap().to_string(), "Discrete(4)");
//!
//! // Unclassifiable samples fail synthesis; there is no partial schema.
//! let bad = NodeValueProbe {
//!     labels: vec!["history".to_string()],
//!     samples: vec![Value::List(vec![])],
//! };
//! assert!(synthesize(&bad).is_err());
//! ```
//!
//! Running a session additionally needs an [`types::Engine`]
//! implementation; see `leyline-env`'s `patrol_rounds` example for the
//! full loop (`ParallelEnv::new` → `reset` → `step`).
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `leyline-core` | IDs, the `Value` model, the `Engine` contract, error taxonomy |
//! | [`spaces`] | `leyline-space` | Space shapes, membership checks, seeded sampling |
//! | [`obs`] | `leyline-obs` | Value classification, schema synthesis, state translation |
//! | [`env`] | `leyline-env` | `ParallelEnv` sessions, configuration, round metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, the value model, and the engine contract (`leyline-core`).
///
/// Contains [`types::AgentId`], [`types::Value`], the [`types::Engine`]
/// trait with its request/response types, and the error taxonomy.
pub use leyline_core as types;

/// Observation and action space shapes (`leyline-space`).
///
/// The [`spaces::Space`] sum type plus its leaves
/// ([`spaces::Flag`], [`spaces::Discrete`], [`spaces::BoxSpace`], ...)
/// and composites ([`spaces::DictSpace`], [`spaces::SequenceSpace`],
/// [`spaces::GraphSpace`], ...).
pub use leyline_space as spaces;

/// Schema synthesis and state translation (`leyline-obs`).
///
/// [`obs::classify`] one sample, [`obs::synthesize`] a whole probe,
/// [`obs::translate`] per-round engine state against the fixed schema.
pub use leyline_obs as obs;

/// Environment sessions (`leyline-env`).
///
/// [`env::ParallelEnv`] drives synchronized rounds over any
/// [`types::Engine`]; [`env::EnvConfig`] configures the session.
pub use leyline_env as env;

/// Common imports for typical Leyline usage.
///
/// ```rust
/// use leyline::prelude::*;
/// ```
///
/// This imports the most frequently used types: the session type and
/// its configuration, the engine contract, the value model, and the
/// space tree.
pub mod prelude {
    // Core types and the engine contract
    pub use leyline_core::{
        ActionBatch, AgentId, BeliefWorld, Engine, EngineIndex, NodeId, NodeValueProbe, Position,
        RoundId, RoundReport, ScenarioConfig, Value, ValueBundle,
    };

    // Errors
    pub use leyline_core::{ClassifyError, EngineError, LookupError, SchemaError, ViolationError};

    // Spaces
    pub use leyline_space::{DictSpace, Space};

    // Schema machinery
    pub use leyline_obs::{classify, synthesize, ObservationSchema, ValueClass};

    // Environment sessions
    pub use leyline_env::{
        ConfigError, EnvConfig, EnvError, ParallelEnv, Phase, RoundMetrics, StepOutcome,
    };
}
