//! Parallel multi-agent environment sessions for Leyline engines.
//!
//! This crate owns the step/reset orchestration built on the schema
//! machinery in `leyline-obs`:
//!
//! - [`ParallelEnv`]: the session type — construction probes the engine
//!   and fixes the observation schema, `reset` rebuilds the world from
//!   the captured scenario, `step` drives one synchronized round.
//! - [`EnvConfig`]: adapter-side configuration and validation.
//! - [`StepOutcome`]: the five parallel per-agent result maps.
//! - [`RoundMetrics`]: wall-clock timings for the most recent round.
//!
//! The session is single-threaded and synchronous: every operation
//! blocks on the engine, and `&mut self` keeps two rounds from ever
//! being in flight against one engine handle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod outcome;
pub mod parallel;

pub use config::{ConfigError, EnvConfig, DEFAULT_MAX_AGENTS};
pub use metrics::RoundMetrics;
pub use outcome::StepOutcome;
pub use parallel::{EnvError, ParallelEnv, Phase};
