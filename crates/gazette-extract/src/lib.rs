//! gazette-extract: turn a gazette PDF at a URL into plain text.
//!
//! [`TextExtractor`] is the seam the service depends on; [`PdfTextExtractor`]
//! downloads with `reqwest` and parses with `pdf-extract`.

pub mod error;
pub mod extractor;

pub use error::ExtractError;
pub use extractor::{ExtractConfig, PdfTextExtractor, TextExtractor};
