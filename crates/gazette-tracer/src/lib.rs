//! gazette-tracer: read access to the gazette amendment graph.
//!
//! [`GazetteService`] answers the timeline, graph, and parent queries through
//! an injected [`QueryExecutor`] and forwards text extraction to an injected
//! [`TextExtractor`]. Rows and errors from both collaborators are returned
//! exactly as produced.

pub mod service;

pub use gazette_extract::TextExtractor;
pub use gazette_graph::QueryExecutor;
pub use service::GazetteService;
