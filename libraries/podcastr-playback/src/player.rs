//! Player - store plus media binding
//!
//! Every transport command mutates the store first, then the binding
//! catches the media output up. Media status callbacks flow the other way.

use crate::{
    binding::{MediaOutput, MediaSignal, PlayerBinding, SyncOutcome},
    error::{PlaybackError, Result},
    events::PlayerEvent,
    store::{PlayerStore, SubscriptionId},
    transport::Transport,
    types::{PlaybackConfig, PlaybackState, SurfaceState},
};
use podcastr_core::Episode;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shared playback state wired to a media output
#[derive(Debug)]
pub struct Player<O: MediaOutput> {
    store: PlayerStore,
    binding: PlayerBinding<O>,
}

impl<O: MediaOutput> Player<O> {
    pub fn new(config: PlaybackConfig, output: O) -> Self {
        Self {
            store: PlayerStore::new(config),
            binding: PlayerBinding::new(output),
        }
    }

    // ===== State Queries =====

    pub fn state(&self) -> &PlaybackState {
        self.store.state()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.store.current_episode()
    }

    pub fn has_next(&self) -> bool {
        self.store.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.store.has_previous()
    }

    /// What the media output is currently doing
    pub fn surface_state(&self) -> SurfaceState {
        self.binding.surface_state()
    }

    pub fn position(&self) -> Duration {
        self.binding.position()
    }

    pub fn output(&self) -> &O {
        self.binding.output()
    }

    pub fn output_mut(&mut self) -> &mut O {
        self.binding.output_mut()
    }

    // ===== Observers =====

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState, &PlayerEvent) + 'static,
    {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    // ===== Seek =====

    /// Seek within the current episode
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.binding.seek(position)
    }

    // ===== Media callbacks =====

    /// Dispatch a status signal from the media output
    pub fn handle_signal(&mut self, signal: MediaSignal) {
        match signal {
            MediaSignal::Playing => self.on_playing(),
            MediaSignal::Paused => self.on_paused(),
            MediaSignal::Ended => self.on_ended(),
            MediaSignal::TimeUpdate(position) => self.on_time_update(position),
            MediaSignal::Failed(message) => self.on_error(message),
        }
    }

    /// The output reports playing. Ignored when nothing is loaded, so a
    /// late report after a clear cannot mark an empty player as playing.
    pub fn on_playing(&mut self) {
        if self.binding.duration().is_none() {
            debug!("Ignoring playing report with nothing loaded");
            return;
        }
        self.binding.note_playing(true);
        self.store.set_playing(true);
    }

    pub fn on_paused(&mut self) {
        self.binding.note_playing(false);
        self.store.set_playing(false);
    }

    pub fn on_time_update(&mut self, position: Duration) {
        self.binding.note_position(position);
        let duration = self.binding.duration().unwrap_or_default();
        self.store
            .report_position(position.as_secs(), duration.as_secs());
    }

    /// Natural end of the current episode
    ///
    /// Loop replays it, otherwise advance, otherwise empty the player.
    pub fn on_ended(&mut self) {
        let Some((index, episode_id)) = self
            .store
            .state()
            .current_index
            .zip(self.current_episode().map(|e| e.id.clone()))
        else {
            return;
        };

        debug!(episode_id = %episode_id, "Episode finished");
        self.store.report_finished(episode_id);

        if self.store.state().is_looping {
            self.replay();
            return;
        }

        if self.store.has_next() {
            // A shuffle draw may land on the same index
            if self.store.advance_next() == Some(index) {
                self.replay();
            } else {
                self.sync();
            }
            return;
        }

        info!("Reached end of episode list");
        self.store.clear();
        self.sync();
    }

    /// The media output failed; fall back to paused and wait for the user
    pub fn on_error(&mut self, message: String) {
        self.binding.note_failure();
        self.fail(PlaybackError::Media(message));
    }

    // ===== Internal =====

    fn sync(&mut self) {
        match self.binding.sync(self.store.state()) {
            Ok(SyncOutcome::Loaded) => {
                // Switching episode always autoplays
                if !self.store.state().is_playing {
                    self.store.set_playing(true);
                }
            }
            Ok(_) => {}
            Err(e) => self.fail(e),
        }
    }

    fn replay(&mut self) {
        match self.binding.restart() {
            Ok(()) => self.store.set_playing(true),
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: PlaybackError) {
        warn!(error = %error, "Playback failed");
        self.store.set_playing(false);
        self.store.report_error(error.to_string());
    }
}

impl<O: MediaOutput> Transport for Player<O> {
    fn play(&mut self, episode: Episode) {
        self.store.play(episode);
        self.sync();
    }

    fn play_list(&mut self, episodes: Vec<Episode>, index: usize) -> Result<()> {
        self.store.play_list(episodes, index)?;
        self.sync();
        Ok(())
    }

    fn play_next(&mut self) {
        self.store.play_next();
        self.sync();
    }

    fn play_previous(&mut self) {
        self.store.play_previous();
        self.sync();
    }

    fn toggle_play(&mut self) {
        if self.store.state().is_empty() {
            debug!("Nothing to play");
            return;
        }
        self.store.toggle_play();
        self.sync();
    }

    fn toggle_loop(&mut self) {
        self.store.toggle_loop();
    }

    fn toggle_shuffle(&mut self) {
        self.store.toggle_shuffle();
    }

    fn set_playing_state(&mut self, playing: bool) {
        // Reported by the output, so nothing to send back to it
        if playing {
            self.on_playing();
        } else {
            self.on_paused();
        }
    }

    fn clear_player_state(&mut self) {
        self.store.clear_player_state();
        self.sync();
    }
}

impl<O: MediaOutput + Default> Default for Player<O> {
    fn default() -> Self {
        Self::new(PlaybackConfig::default(), O::default())
    }
}
