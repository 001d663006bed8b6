//! Error types for header generation

use std::path::PathBuf;

/// Result alias used by the generators
pub type Result<T> = std::result::Result<T, GenError>;

/// Fatal generation error. The target file is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Source file missing or unreadable
    #[error("failed to read input {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target directory missing or target not writable
    #[error("failed to write output {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Build action invoked with an empty target list
    #[error("build action invoked without a target")]
    MissingTarget,

    /// Input name does not form a valid C identifier
    #[error("'{name}' (from {}) is not a valid identifier", path.display())]
    InvalidIdentifier { name: String, path: PathBuf },

    /// Two inputs map to the same generated identifier
    #[error("identifier '{name}' generated by both {} and {}", first.display(), second.display())]
    IdentifierCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}
