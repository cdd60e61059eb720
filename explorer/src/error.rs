//! Error types for the explorer.
//!
//! Fetching can fail, decoding can fail, and rendering can fail when the
//! surface lacks a mount point. Everything else is infallible.

use thiserror::Error;

/// Errors produced by snapshot providers and the renderer.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The surface has no element with the requested id.
    #[error("mount point not found: #{id}")]
    NotFound {
        /// The element id that was looked up.
        id: String,
    },

    /// The payload could not be decoded into a chain snapshot.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// The remote endpoint was unreachable or answered with an error status.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Every attempt ran into the per-attempt timeout.
    #[error("fetch timed out after {attempts} attempt(s)")]
    Timeout {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
}

impl ExplorerError {
    /// Builds a [`ExplorerError::NotFound`] for the given element id.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedSnapshot(e.to_string())
    }
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_element() {
        let err = ExplorerError::not_found("blockHeight");
        assert_eq!(err.to_string(), "mount point not found: #blockHeight");
    }

    #[test]
    fn test_json_errors_map_to_malformed_snapshot() {
        let err: ExplorerError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ExplorerError::MalformedSnapshot(_)));
    }
}
