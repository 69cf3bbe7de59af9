use std::path::PathBuf;

/// Result type for lint-project operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or reading a project.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `package.json` was found in the start directory or any ancestor.
    #[error("no project manifest found in {start} or any parent directory")]
    ProjectNotFound { start: PathBuf },

    /// The project manifest exists but could not be parsed.
    #[error("failed to parse {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error reading project files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
