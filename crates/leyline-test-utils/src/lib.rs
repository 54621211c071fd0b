//! Test utilities and mock engines for Leyline development.
//!
//! Provides [`MockEngine`] — a complete in-memory implementation of the
//! [`Engine`](leyline_core::Engine) contract with injectable failures —
//! plus the reference probe and belief fixtures shared across crates.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{reference_belief, reference_probe, MockAgents, MockEngine, MockWorld};
