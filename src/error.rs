use std::path::PathBuf;

/// Errors raised while setting up or writing log output.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write log output: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to spawn repaint thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("invalid config: {0}")]
    Config(String),
}
