use crate::Category;

/// Error type for registry operations.
///
/// Per-mirror failures (`MirrorRequestFailed`, `MirrorParseFailed`) are only
/// ever seen by callers inside the `causes` of `AllMirrorsFailed`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid module type: {0}")]
    InvalidCategory(String),

    #[error("request to {url} failed: {reason}")]
    MirrorRequestFailed { url: String, reason: String },

    #[error("failed to parse response from {url}: {reason}")]
    MirrorParseFailed { url: String, reason: String },

    #[error("failed to get {category} list ({} mirror(s) failed)", .causes.len())]
    AllMirrorsFailed {
        category: Category,
        causes: Vec<StoreError>,
    },
}

impl StoreError {
    // Per-mirror causes of an aggregate failure, empty for everything else
    #[must_use]
    pub fn causes(&self) -> &[StoreError] {
        match self {
            StoreError::AllMirrorsFailed { causes, .. } => causes,
            _ => &[],
        }
    }
}
