use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the word vector crate.
pub type Result<T> = std::result::Result<T, WordVectorError>;

/// Errors raised while loading vector tables or materializing matrices.
#[derive(Debug, Error)]
pub enum WordVectorError {
    /// Filesystem interaction failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The resolved resource does not exist on disk.
    #[error("word vector resource not found at {}", .0.display())]
    MissingResource(PathBuf),
    /// A line of the embedding file could not be parsed.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    /// A line carried a different number of components than the rest of the file.
    #[error("line {line}: expected {expected} components, found {found}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// `mean` or `std` was not a scalar or a one dimensional array.
    #[error("{name} must be a scalar or a one dimensional array, found rank {rank}")]
    MomentShape { name: &'static str, rank: usize },
    /// `mean` or `std` was one dimensional but its length differs from `n_dims`.
    #[error("the length of {name} should be equal to n_dims ({expected}), found {found}")]
    MomentLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    /// Default embeddings were supplied in a container shape that is not accepted.
    #[error("default embeddings must be a 2-D array or a list of 1-D vectors, found rank {rank}")]
    UnsupportedDefaultEmbeddings { rank: usize },
    /// Default embeddings do not line up with the requested matrix.
    #[error("default embeddings shape {found:?} does not match expected {expected:?}")]
    DefaultEmbeddingsShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
}
