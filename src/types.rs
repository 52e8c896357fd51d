use serde::Deserialize;
use std::path::PathBuf;

/// One input line: a set of matches, each carrying its environment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub matches: Vec<Match>,
}

/// A matched item and the variables bound by it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Match {
    pub environment: Vec<Variable>,
}

/// A single environment variable. `value` is still escaped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variable {
    pub value: String,
}

impl Record {
    /// All variables across all matches, flattened in document order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.matches.iter().flat_map(|m| m.environment.iter())
    }

    pub fn variable_count(&self) -> usize {
        self.matches.iter().map(|m| m.environment.len()).sum()
    }
}

/// Where and how artifacts get written
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Existing, writable directory receiving one file per variable
    pub output_dir: PathBuf,

    /// Appended verbatim to each generated name (include the dot yourself)
    pub extension: String,
}

impl ExtractConfig {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        ExtractConfig {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }
}

/// Counters for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines processed
    pub lines: usize,

    /// Files written
    pub artifacts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variables_flatten_in_document_order() {
        let record: Record = serde_json::from_value(json!({
            "matches": [
                {"environment": [{"value": "a"}, {"value": "b"}]},
                {"environment": []},
                {"environment": [{"value": "c"}]}
            ]
        }))
        .unwrap();

        let values: Vec<&str> = record.variables().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
        assert_eq!(record.variable_count(), 3);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record: Record = serde_json::from_value(json!({
            "uri": "file.rs",
            "matches": [{
                "range": {"start": 0},
                "environment": [{"variable": "x", "value": "1", "range": {}}]
            }]
        }))
        .unwrap();

        assert_eq!(record.variable_count(), 1);
    }

    #[test]
    fn test_missing_keys_are_rejected() {
        assert!(serde_json::from_value::<Record>(json!({})).is_err());
        assert!(serde_json::from_value::<Record>(json!({"matches": [{}]})).is_err());
        assert!(serde_json::from_value::<Record>(json!({
            "matches": [{"environment": [{"variable": "x"}]}]
        }))
        .is_err());
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let result = serde_json::from_value::<Record>(json!({
            "matches": [{"environment": [{"value": 42}]}]
        }));
        assert!(result.is_err());
    }
}
