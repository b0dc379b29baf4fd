//! gazette-core: Shared types, configuration, and error handling for the Gazette tracer.
//!
//! This crate provides the foundational types used across all Gazette components:
//! - Gazette nodes and the row projections returned by the graph queries
//! - Configuration loading for the Neo4j connection and PDF extraction
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::GazetteConfig;
pub use error::GazetteError;
pub use types::{
    decode_records, to_record, AmendmentTree, DateRecord, Gazette, GazetteNode, GraphEdgeRecord,
    ParentRecord, Record, TimelineRecord,
};
