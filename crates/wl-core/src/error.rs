//! Error types for the Wavelength core.

use std::path::PathBuf;

/// Result type for core operations.
pub type WlResult<T> = Result<T, WlError>;

/// Errors that abort catalog loading or session construction.
///
/// Invalid player actions are not errors; they come back as
/// [`Rejection`](crate::engine::Rejection) inside an action report.
#[derive(Debug, thiserror::Error)]
pub enum WlError {
    /// The dataset file could not be read.
    #[error("cannot read dataset {path}: {source}")]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON.
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document is JSON but neither a category map nor a pair list.
    #[error("dataset must be a list of pairs or contain \"categories\" or \"spectrum_pairs\"")]
    UnrecognizedShape,

    /// A category entry is not a list.
    #[error("category \"{0}\" is not a list of spectrum pairs")]
    NotAList(String),

    /// A pair in the dataset is structurally valid JSON but unusable.
    #[error("malformed pair #{index} in category \"{category}\": {reason}")]
    Malformed {
        /// Category the pair belongs to.
        category: String,
        /// Zero-based index of the pair within its category.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A category has no pairs.
    #[error("category \"{0}\" has no spectrum pairs")]
    EmptyCategory(String),

    /// The dataset contains no pairs at all.
    #[error("dataset contains no spectrum pairs")]
    EmptyDataset,

    /// A user category uses the name reserved for the union of all pairs.
    #[error("category name \"{0}\" is reserved")]
    ReservedCategory(String),

    /// The session was configured with too few players.
    #[error("player count must be at least 2, got {0}")]
    InvalidPlayerCount(usize),
}
