//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Start index outside the episode list
    #[error("Index {index} out of bounds for list of {len} episodes")]
    InvalidIndex { index: usize, len: usize },

    /// An episode list was required but none was given
    #[error("Episode list is empty")]
    EmptyEpisodeList,

    /// Nothing is loaded on the media output
    #[error("No episode loaded")]
    NoEpisodeLoaded,

    /// Seek target past the end of the episode
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),

    /// The media output failed to load or play
    #[error("Media output error: {0}")]
    Media(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
