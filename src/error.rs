//! Error types for chunk resolution and combining

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for resolver and combiner operations
pub type Result<T> = std::result::Result<T, CombineError>;

/// Process exit code for success and for a declined overwrite
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code for all fatal errors
pub const EXIT_FAILURE: i32 = 1;

/// Errors that can occur while resolving or combining chunks
#[derive(Error, Debug)]
pub enum CombineError {
    /// Reference filename matches none of the known chunk suffix conventions
    #[error("could not determine base name from '{name}' (expected a suffix like .001, .aa, .part1, or .chunk1)")]
    UnrecognizedSuffix { name: String },

    /// Base name inferred but no sibling chunk files matched it
    #[error("no chunk files found matching base name '{base}' in {dir}")]
    NoChunksFound { base: String, dir: PathBuf },

    /// I/O error during discovery or combine
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid run configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl CombineError {
    /// Create an unrecognized-suffix error
    pub fn unrecognized_suffix<S: Into<String>>(name: S) -> Self {
        CombineError::UnrecognizedSuffix { name: name.into() }
    }

    /// Create a no-chunks-found error
    pub fn no_chunks_found<S: Into<String>, P: Into<PathBuf>>(base: S, dir: P) -> Self {
        CombineError::NoChunksFound {
            base: base.into(),
            dir: dir.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        CombineError::Config(message.into())
    }
}
