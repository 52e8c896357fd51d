use crate::error::{ExtractError, Result};
use crate::types::ExtractConfig;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes each value to its own freshly named file in the output directory
pub struct ArtifactWriter {
    output_dir: PathBuf,
    extension: String,
    written: usize,
}

impl ArtifactWriter {
    /// Create a writer for an existing output directory.
    ///
    /// The directory is never created here; a missing directory is an error.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let output_dir = &config.output_dir;
        let metadata = std::fs::metadata(output_dir).map_err(|e| ExtractError::OutputDir {
            path: output_dir.clone(),
            reason: e.to_string(),
        })?;

        if !metadata.is_dir() {
            return Err(ExtractError::OutputDir {
                path: output_dir.clone(),
                reason: "not a directory".to_string(),
            });
        }

        Ok(ArtifactWriter {
            output_dir: output_dir.clone(),
            extension: config.extension.clone(),
            written: 0,
        })
    }

    /// Write `value` plus a trailing newline to a new file, returning its path
    pub fn write(&mut self, value: &str) -> Result<PathBuf> {
        let path = self.next_path();

        // create_new: a name clash is an error, never an overwrite
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        writeln!(file, "{}", value)?;
        file.flush()?;

        self.written += 1;
        tracing::debug!(path = %path.display(), bytes = value.len() + 1, "wrote artifact");
        Ok(path)
    }

    /// Number of files written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn next_path(&self) -> PathBuf {
        let name = format!("{}{}", Uuid::new_v4(), self.extension);
        self.output_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_write_appends_newline() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::new(&ExtractConfig::new(dir.path(), ".txt")).unwrap();

        let path = writer.write("a\nb").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(writer.written(), 1);
    }

    #[test]
    fn test_name_is_uuid_plus_extension() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::new(&ExtractConfig::new(dir.path(), ".seed")).unwrap();

        let path = writer.write("x").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        let stem = name.strip_suffix(".seed").unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn test_empty_extension() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::new(&ExtractConfig::new(dir.path(), "")).unwrap();

        let path = writer.write("x").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(Uuid::parse_str(name).is_ok());
    }

    #[test]
    fn test_same_value_gets_distinct_files() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::new(&ExtractConfig::new(dir.path(), ".txt")).unwrap();

        let paths: HashSet<PathBuf> = (0..50).map(|_| writer.write("same").unwrap()).collect();

        assert_eq!(paths.len(), 50);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 50);
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = ArtifactWriter::new(&ExtractConfig::new(&missing, ".txt"));

        assert!(matches!(result, Err(ExtractError::OutputDir { .. })));
        assert!(!missing.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_directory_fails_on_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

        // root ignores the mode bits
        if std::fs::write(dir.path().join("check"), "").is_ok() {
            std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut writer = ArtifactWriter::new(&ExtractConfig::new(dir.path(), ".txt")).unwrap();
        let result = writer.write("x");

        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(result, Err(ExtractError::Io(_))));
        assert_eq!(writer.written(), 0);
    }

    #[test]
    fn test_file_as_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "").unwrap();

        let result = ArtifactWriter::new(&ExtractConfig::new(&file, ".txt"));

        assert!(matches!(result, Err(ExtractError::OutputDir { .. })));
    }
}
