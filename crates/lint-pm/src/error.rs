/// Result type for lint-pm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during package-manager operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external install command exited unsuccessfully. Output was
    /// streamed to the terminal, so the message points there.
    #[error("dependency install failed: `{command}` exited with a non-zero status (see output above)")]
    InstallFailed {
        manager: String,
        command: String,
        exit_code: Option<i32>,
    },

    /// I/O error spawning or waiting on the install command.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
