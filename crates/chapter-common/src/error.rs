/// Error types shared across the chapter archive crates.
///
/// These cover loading the chapter catalog from disk. Application-specific errors
/// are defined in each binary crate and wrap `CommonError` via `#[from]`.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk chapter directory: {0}")]
    Walk(#[from] walkdir::Error),
}
