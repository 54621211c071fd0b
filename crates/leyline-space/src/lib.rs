//! Observation and action space shapes for Leyline environments.
//!
//! This crate defines the [`Space`] enum — the shape tree against which
//! all observations and actions are checked and from which random
//! members are drawn — along with the concrete leaf and composite
//! shapes it is built from.
//!
//! # Leaves
//!
//! - [`Flag`]: boolean flags
//! - [`Discrete`]: integers `{0, ..., n-1}`
//! - [`BoxSpace`]: real scalars and fixed-length real vectors
//! - [`MultiBinary`]: fixed-length boolean vectors
//! - [`MultiDiscrete`]: integer vectors with per-element bounds
//! - [`TextSpace`]: strings up to a character bound
//!
//! # Composites
//!
//! - [`TupleSpace`]: fixed-arity heterogeneous products
//! - [`DictSpace`]: labeled, ordered products
//! - [`SequenceSpace`]: variable-length homogeneous sequences
//! - [`GraphSpace`]: node-link graphs with per-node features

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boxspace;
pub mod dict;
pub mod discrete;
pub mod error;
pub mod flag;
pub mod graph;
pub mod multibinary;
pub mod multidiscrete;
pub mod sequence;
pub mod space;
pub mod text;
pub mod tuple;

#[cfg(test)]
pub(crate) mod compliance;

pub use boxspace::BoxSpace;
pub use dict::DictSpace;
pub use discrete::Discrete;
pub use error::SpaceError;
pub use flag::Flag;
pub use graph::GraphSpace;
pub use multibinary::MultiBinary;
pub use multidiscrete::MultiDiscrete;
pub use sequence::SequenceSpace;
pub use space::Space;
pub use text::TextSpace;
pub use tuple::TupleSpace;
