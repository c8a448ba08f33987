//! Player events
//!
//! Emitted by the store after each command completes and delivered to
//! subscribers together with the post-command state.

use crate::types::SurfaceState;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Play flag changed
    StateChanged {
        /// Surface state after the change
        state: SurfaceState,
    },

    /// A different episode became current
    EpisodeChanged {
        /// ID of the new current episode
        episode_id: String,
        /// ID of the previous episode (if any)
        previous_episode_id: Option<String>,
        /// Index of the new episode in the list
        index: usize,
    },

    /// Episode list replaced
    QueueChanged {
        /// New list length
        length: usize,
    },

    /// Loop flag flipped
    LoopChanged { enabled: bool },

    /// Shuffle flag flipped
    ShuffleChanged { enabled: bool },

    /// Episode finished playing naturally
    EpisodeFinished { episode_id: String },

    /// Player emptied
    Cleared,

    /// Position report from the media output
    PositionUpdate {
        /// Current position in seconds
        position_secs: u64,
        /// Episode length in seconds
        duration_secs: u64,
    },

    /// The media output failed
    Error { message: String },
}
