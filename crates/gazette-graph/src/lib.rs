//! Gazette Graph — query execution against the gazette amendment graph.
//!
//! Every read the tracer performs is one of the fixed Cypher queries in
//! [`queries::GazetteQuery`]. Executors run them and hand rows back as raw
//! records: [`GraphClient`] against Neo4j, [`MemoryGraph`] in process.

pub mod client;
pub mod executor;
pub mod memory;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use executor::QueryExecutor;
pub use memory::MemoryGraph;
pub use queries::GazetteQuery;
