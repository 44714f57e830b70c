use crate::models::Topic;
use thiserror::Error;

/// Data-integrity defects caught when the corpus is loaded. These are never
/// tolerated at runtime: a bucket that references a missing citation is a
/// broken dataset, not a condition to render around.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("bucket '{topic}' item from {source_name} references missing citation id {id}")]
    DanglingCitation {
        topic: Topic,
        source_name: String,
        id: u32,
    },

    #[error("bucket '{topic}' item from {source_name} has confidence {confidence} outside [0, 1]")]
    ConfidenceOutOfRange {
        topic: Topic,
        source_name: String,
        confidence: f64,
    },

    #[error("bucket '{0}' is empty")]
    EmptyBucket(Topic),

    #[error("corpus is missing the default bucket '{0}'")]
    MissingDefaultBucket(Topic),
}

/// Runtime conditions the view layer recovers from.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("citation {0} not found")]
    CitationNotFound(u32),
}

pub type Result<T, E = CorpusError> = std::result::Result<T, E>;
