//! # envdump - dump match environments to files
//!
//! Reads newline-delimited JSON records of the shape
//! `{"matches": [{"environment": [{"value": "..."}]}]}` and writes every
//! variable value, with its backslash escapes decoded, to its own file named
//! `<uuid><extension>` inside an output directory.
//!
//! ## Modules
//!
//! - **types**: the record data model and run configuration
//! - **unescape**: string-literal escape decoding
//! - **writer**: one-file-per-value artifact writer
//! - **extractor**: the line-by-line pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use envdump::{ExtractConfig, LineExtractor};
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let mut extractor = LineExtractor::new(ExtractConfig::new(dir.path(), ".txt"))?;
//!
//! let input = r#"{"matches":[{"environment":[{"value":"a\\nb"}]}]}"#;
//! let summary = extractor.run(Cursor::new(input))?;
//!
//! assert_eq!(summary.artifacts, 1);
//! # Ok(())
//! # }
//! ```

use std::io::BufRead;

pub mod error;
pub mod extractor;
pub mod types;
pub mod unescape;
pub mod writer;

pub use error::{ExtractError, Result};
pub use extractor::LineExtractor;
pub use types::{ExtractConfig, Match, Record, RunSummary, Variable};
pub use unescape::{unescape, UnescapeError};
pub use writer::ArtifactWriter;

/// Main entry point: extract every variable in an NDJSON stream to files
pub fn extract_stream<R: BufRead>(reader: R, config: ExtractConfig) -> Result<RunSummary> {
    let mut extractor = LineExtractor::new(config)?;
    extractor.run(reader)
}
