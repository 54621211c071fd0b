//! Observation schema synthesis and state translation for Leyline.
//!
//! This crate owns both directions of the schema contract:
//!
//! - **Synthesis** ([`synthesize`]): probe one node's labeled samples,
//!   classify each sample ([`classify`]), and fix the observation tree
//!   for the lifetime of the environment instance.
//! - **Translation** ([`translate`], [`global_state`]): validate every
//!   later world view against that fixed schema and assemble it into an
//!   observation value. Divergence fails loudly; nothing is coerced.
//!
//! Classification follows the schema-from-example convention: sample
//! values carry bounds and shapes, not data. See [`classify`] for the
//! rule table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod schema;
pub mod translate;

pub use classify::{classify, ValueClass};
pub use schema::{
    synthesize, ObservationSchema, AGENT_POSITION_LABEL, MAP_LABEL, NODE_VALUES_LABEL,
};
pub use translate::{global_state, translate};
