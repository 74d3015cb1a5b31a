//! tabid core: prefix message ids with the ids of their ancestors
//!
//! Protocol tables are stored as JSON trees in which many tabs contain the
//! same two children, an upstream message and a downstream message, each with
//! the same `"id"`. This crate makes those ids unique by prefixing them with
//! the ids of their parent and grandparent objects:
//!
//! ```text
//! {"id": "AFN00", "tab": {"id": "F1", "up": {"id": "上行报文"}}}
//!                                          ↓
//! {"id": "AFN00", "tab": {"id": "F1", "up": {"id": "AFN00_F1_上行报文"}}}
//! ```
//!
//! ## Pieces
//!
//! - [`annotate`](mod@annotate) - the in-place tree walk
//! - [`pipeline`] - load → annotate → save around a file pair
//! - [`config`] - sentinel labels and default paths
//! - [`error`] - what can go wrong
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//!
//! let mut doc = json!({"id": "A", "b": {"id": "B", "c": {"id": "下行报文"}}});
//! let stats = tabid_core::annotate(&mut doc);
//!
//! assert_eq!(doc["b"]["c"]["id"], "A_B_下行报文");
//! assert_eq!(stats.rewritten, 1);
//! ```

// this_file: crates/tabid-core/src/lib.rs

pub mod annotate;
pub mod config;
pub mod error;
pub mod pipeline;

pub use annotate::{annotate, AnnotateStats, Annotator};
pub use config::PipelineConfig;
pub use error::{Result, TabidError};
pub use pipeline::{run, Pipeline, PipelineBuilder, RunReport};
