//! Transport command surface
//!
//! The commands every UI control issues. Implemented by the bare
//! [`PlayerStore`] and by [`crate::Player`], which also drives the media
//! output, so widgets can be written against the trait.

use crate::{error::Result, store::PlayerStore};
use podcastr_core::Episode;
use tracing::debug;

/// Playback commands
pub trait Transport {
    /// Play a single episode right away
    fn play(&mut self, episode: Episode);

    /// Play `episodes` starting at `index`, so next/previous walk the list
    fn play_list(&mut self, episodes: Vec<Episode>, index: usize) -> Result<()>;

    /// Move to the next episode; a no-op when there is none
    fn play_next(&mut self);

    /// Move to the previous episode; a no-op at the start of the list
    fn play_previous(&mut self);

    fn toggle_play(&mut self);

    fn toggle_loop(&mut self);

    fn toggle_shuffle(&mut self);

    /// Sync the play flag from the media output
    fn set_playing_state(&mut self, playing: bool);

    /// Empty the player
    fn clear_player_state(&mut self);
}

impl Transport for PlayerStore {
    fn play(&mut self, episode: Episode) {
        self.replace_single_episode(episode);
    }

    fn play_list(&mut self, episodes: Vec<Episode>, index: usize) -> Result<()> {
        self.replace_episode_list(episodes, index)
    }

    fn play_next(&mut self) {
        if self.advance_next().is_none() {
            debug!("No next episode");
        }
    }

    fn play_previous(&mut self) {
        if self.advance_previous().is_none() {
            debug!("No previous episode");
        }
    }

    fn toggle_play(&mut self) {
        self.flip_playing();
    }

    fn toggle_loop(&mut self) {
        self.flip_looping();
    }

    fn toggle_shuffle(&mut self) {
        self.flip_shuffling();
    }

    fn set_playing_state(&mut self, playing: bool) {
        self.set_playing(playing);
    }

    fn clear_player_state(&mut self) {
        self.clear();
    }
}
