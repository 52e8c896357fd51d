use crate::error::{ExtractError, Result};
use crate::types::{ExtractConfig, Record, RunSummary};
use crate::unescape::unescape;
use crate::writer::ArtifactWriter;
use serde_json::Value;
use std::io::BufRead;
use std::path::PathBuf;

/// Turns NDJSON records into one artifact per environment variable
pub struct LineExtractor {
    writer: ArtifactWriter,
    lines: usize,
}

impl LineExtractor {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        Ok(LineExtractor {
            writer: ArtifactWriter::new(&config)?,
            lines: 0,
        })
    }

    /// Process a single input line, returning the artifacts written for it.
    ///
    /// Invalid JSON yields [`ExtractError::Malformed`] carrying the raw line.
    /// Valid JSON of the wrong shape yields [`ExtractError::Structure`]; in that
    /// case nothing is written for the line.
    pub fn process_line(&mut self, line: &str) -> Result<Vec<PathBuf>> {
        let value: Value = serde_json::from_str(line).map_err(|source| ExtractError::Malformed {
            line: line.to_string(),
            source,
        })?;

        let record: Record = serde_json::from_value(value).map_err(ExtractError::Structure)?;

        let mut paths = Vec::with_capacity(record.variable_count());
        for variable in record.variables() {
            // Decode first so a bad value never leaves an empty file behind
            let decoded = unescape(&variable.value)?;
            paths.push(self.writer.write(&decoded)?);
        }

        self.lines += 1;
        tracing::trace!(line = self.lines, artifacts = paths.len(), "processed line");
        Ok(paths)
    }

    /// Process every line of `reader`, stopping at the first error
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<RunSummary> {
        for line in reader.lines() {
            let line = line?;
            self.process_line(&line)?;
        }

        let summary = self.summary();
        tracing::info!(
            lines = summary.lines,
            artifacts = summary.artifacts,
            dir = %self.writer.output_dir().display(),
            "extraction complete"
        );
        Ok(summary)
    }

    /// Counters so far, including lines processed before a failure
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            lines: self.lines,
            artifacts: self.writer.written(),
        }
    }
}
