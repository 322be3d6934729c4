//! Resolution errors surfaced to the host messaging layer.

use crate::discovery::RegistryError;

/// Result type for topic resolution.
pub type Result<T> = std::result::Result<T, MatchmakerError>;

/// Errors returned from `MatchMaker::resolve`.
///
/// An empty target list is not an error: "no healthy hosts" is reported
/// as `Ok(vec![])` and left to the caller to act on.
#[derive(Debug, thiserror::Error)]
pub enum MatchmakerError {
    #[error("Malformed topic '{topic}': {reason}")]
    MalformedTopic { topic: String, reason: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl MatchmakerError {
    pub(crate) fn malformed(topic: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTopic {
            topic: topic.to_string(),
            reason: reason.into(),
        }
    }

    /// True if the topic itself was rejected, as opposed to a registry failure.
    pub fn is_malformed_topic(&self) -> bool {
        matches!(self, Self::MalformedTopic { .. })
    }
}
