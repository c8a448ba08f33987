//! Core types for playback management

use podcastr_core::Episode;
use serde::{Deserialize, Serialize};

/// Canonical playback state
///
/// The single mutable record of the playback core. Only the store writes
/// it; everything else receives `&PlaybackState`.
///
/// Invariant: `current_index` is `Some(i)` with `i < episode_list.len()`
/// whenever the list is non-empty, and `None` iff the list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Active episodes, in navigation order
    pub episode_list: Vec<Episode>,

    /// Position of the current episode in `episode_list`
    pub current_index: Option<usize>,

    /// Whether playback is (or should be) active
    pub is_playing: bool,

    /// Replay the current episode when it ends
    pub is_looping: bool,

    /// Pick the next episode at random
    pub is_shuffling: bool,
}

impl PlaybackState {
    /// The episode at `current_index`, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|i| self.episode_list.get(i))
    }

    /// Whether nothing is loaded
    pub fn is_empty(&self) -> bool {
        self.episode_list.is_empty()
    }

    /// Whether the index invariant holds
    pub fn is_consistent(&self) -> bool {
        match self.current_index {
            Some(i) => i < self.episode_list.len(),
            None => self.episode_list.is_empty(),
        }
    }
}

/// Configuration for the player store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Fixed seed for shuffle draws (default: seeded from OS entropy)
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Never let a shuffle draw land on the current episode
    /// when there is another one to choose (default: false)
    #[serde(default)]
    pub avoid_shuffle_repeat: bool,
}

/// What the player surface is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceState {
    /// No episode loaded
    Idle,

    /// Episode loaded, not playing
    LoadedPaused,

    /// Episode loaded and playing
    LoadedPlaying,
}
