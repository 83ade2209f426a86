use std::path::Path;

use crate::data::loader::{self, LoadError};

/// File the demo tries to read from the working directory.
pub const FALLBACK_PATH: &str = "mydata.csv";

/// Result of trying to read an optional, user-supplied dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    Loaded,
    NotFound,
    Failed(String),
}

impl FallbackOutcome {
    /// Console line for this outcome.
    pub fn message(&self) -> String {
        match self {
            FallbackOutcome::Loaded => "✅ File loaded successfully!".to_string(),
            FallbackOutcome::NotFound => "⚠️ Error: The file was not found.".to_string(),
            FallbackOutcome::Failed(reason) => format!("⚠️ An error occurred: {reason}"),
        }
    }
}

/// Try to load `path`. The loaded table is discarded; only the outcome is
/// kept.
pub fn try_load(path: &Path) -> FallbackOutcome {
    match loader::load_file(path) {
        Ok(frame) => {
            log::info!(
                "Loaded {} rows x {} columns from {}",
                frame.len(),
                frame.columns.len(),
                path.display()
            );
            if let Some(first) = frame.row_text(0) {
                log::debug!("First row: {}", first.join(", "));
            }
            FallbackOutcome::Loaded
        }
        Err(LoadError::NotFound(p)) => {
            log::warn!("{} does not exist", p.display());
            FallbackOutcome::NotFound
        }
        Err(e) => {
            log::warn!("Failed to load {}: {e}", path.display());
            FallbackOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_path_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = try_load(&dir.path().join(FALLBACK_PATH));

        assert_eq!(outcome, FallbackOutcome::NotFound);
        assert_eq!(outcome.message(), "⚠️ Error: The file was not found.");
    }

    #[test]
    fn malformed_file_reports_the_underlying_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FALLBACK_PATH);
        std::fs::write(&path, "a,b\n1,2,3,4\n").unwrap();

        let outcome = try_load(&path);
        let FallbackOutcome::Failed(reason) = &outcome else {
            panic!("expected a failure, got {outcome:?}");
        };
        assert_eq!(reason, "Error tokenizing data. Expected 2 fields in line 2, saw 4");
        assert_eq!(
            outcome.message(),
            format!("⚠️ An error occurred: {reason}")
        );
    }

    #[test]
    fn empty_file_reports_no_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FALLBACK_PATH);
        std::fs::write(&path, "").unwrap();

        assert_eq!(
            try_load(&path).message(),
            "⚠️ An error occurred: No columns to parse from file"
        );
    }

    #[test]
    fn valid_file_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FALLBACK_PATH);
        std::fs::write(&path, "x,y\n1,2\n3,4\n5,6\n").unwrap();

        let outcome = try_load(&path);
        assert_eq!(outcome, FallbackOutcome::Loaded);
        assert_eq!(outcome.message(), "✅ File loaded successfully!");
    }

    #[test]
    fn short_rows_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FALLBACK_PATH);
        std::fs::write(&path, "a,b\n1,2\n3\n").unwrap();

        assert_eq!(try_load(&path), FallbackOutcome::Loaded);
    }
}
