//! Core types for the Leyline environment adapter.
//!
//! This crate defines the vocabulary shared by every other Leyline
//! crate: strongly-typed identifiers, the [`Value`] model for
//! engine-emitted data, the [`Engine`] contract trait with its
//! request/response types, and the error taxonomy.
//!
//! # Identity and indexing
//!
//! External agent IDs are 1-based ([`AgentId`]); the engine indexes
//! agents from 0 ([`EngineIndex`]). The two meet in exactly one place,
//! [`AgentId::engine_index`], so indexing drift cannot creep in at call
//! sites.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod id;
pub mod value;

pub use engine::{ActionBatch, BeliefWorld, Engine, NodeValueProbe, RoundReport, ScenarioConfig};
pub use error::{ClassifyError, EngineError, LookupError, SchemaError, ViolationError};
pub use id::{AgentId, EngineIndex, NodeId, RoundId};
pub use value::{GraphValue, Position, Value, ValueBundle, ValueKind};
