//! Playback state store
//!
//! Owns the one `PlaybackState` and is its only writer. Each command runs
//! to completion, then queued events are delivered to subscribers along
//! with the finished state, so no observer ever sees a half-applied change.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    navigation,
    types::{PlaybackConfig, PlaybackState, SurfaceState},
};
use podcastr_core::Episode;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, warn};

/// Handle returned by [`PlayerStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&PlaybackState, &PlayerEvent)>;

/// Observable owner of the playback state
pub struct PlayerStore {
    state: PlaybackState,

    // Shuffle
    rng: StdRng,
    avoid_shuffle_repeat: bool,

    // Observers
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    pending_events: Vec<PlayerEvent>,
}

/// Snapshot of the fields whose changes are announced by diffing
struct Checkpoint {
    surface: SurfaceState,
    episode: Option<(usize, String)>,
}

impl PlayerStore {
    /// Create an empty store
    pub fn new(config: PlaybackConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: PlaybackState::default(),
            rng,
            avoid_shuffle_repeat: config.avoid_shuffle_repeat,
            subscribers: Vec::new(),
            next_subscription: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Reads =====

    /// Current state (read-only)
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    /// Episode at the current index
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    pub fn has_next(&self) -> bool {
        navigation::has_next(&self.state)
    }

    pub fn has_previous(&self) -> bool {
        navigation::has_previous(&self.state)
    }

    /// Surface state implied by the store alone
    ///
    /// An empty list is idle whatever the play flag says.
    pub fn surface_state(&self) -> SurfaceState {
        if self.state.is_empty() {
            SurfaceState::Idle
        } else if self.state.is_playing {
            SurfaceState::LoadedPlaying
        } else {
            SurfaceState::LoadedPaused
        }
    }

    // ===== Observers =====

    /// Register an observer called once per event, after each command
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState, &PlayerEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // ===== Mutations =====

    /// Replace the list with a single episode and start playing it
    pub(crate) fn replace_single_episode(&mut self, episode: Episode) {
        let checkpoint = self.checkpoint();

        debug!(episode_id = %episode.id, "Playing single episode");
        self.state.episode_list = vec![episode];
        self.state.current_index = Some(0);
        self.state.is_playing = true;
        self.emit(PlayerEvent::QueueChanged { length: 1 });

        self.finish(checkpoint);
    }

    /// Replace the list and start playing at `start_index`
    ///
    /// Rejects an out-of-range index without touching the state.
    pub(crate) fn replace_episode_list(
        &mut self,
        episodes: Vec<Episode>,
        start_index: usize,
    ) -> Result<()> {
        if episodes.is_empty() {
            warn!(start_index, "Rejected empty episode list");
            return Err(PlaybackError::EmptyEpisodeList);
        }
        if start_index >= episodes.len() {
            warn!(start_index, len = episodes.len(), "Rejected out-of-range start index");
            return Err(PlaybackError::InvalidIndex {
                index: start_index,
                len: episodes.len(),
            });
        }

        let checkpoint = self.checkpoint();

        debug!(len = episodes.len(), start_index, "Playing episode list");
        let length = episodes.len();
        self.state.episode_list = episodes;
        self.state.current_index = Some(start_index);
        self.state.is_playing = true;
        self.emit(PlayerEvent::QueueChanged { length });

        self.finish(checkpoint);
        Ok(())
    }

    /// Empty the player
    ///
    /// Also drops the play flag so the state never claims to be playing
    /// nothing.
    pub(crate) fn clear(&mut self) {
        let checkpoint = self.checkpoint();

        debug!("Clearing player state");
        self.state.episode_list.clear();
        self.state.current_index = None;
        self.state.is_playing = false;
        self.emit(PlayerEvent::Cleared);

        self.finish(checkpoint);
    }

    /// Set the play flag (status sync from the media output)
    pub(crate) fn set_playing(&mut self, playing: bool) {
        let checkpoint = self.checkpoint();
        self.state.is_playing = playing;
        self.finish(checkpoint);
    }

    pub(crate) fn flip_playing(&mut self) {
        let checkpoint = self.checkpoint();
        self.state.is_playing = !self.state.is_playing;
        self.finish(checkpoint);
    }

    pub(crate) fn flip_looping(&mut self) {
        let checkpoint = self.checkpoint();
        self.state.is_looping = !self.state.is_looping;
        self.emit(PlayerEvent::LoopChanged {
            enabled: self.state.is_looping,
        });
        self.finish(checkpoint);
    }

    pub(crate) fn flip_shuffling(&mut self) {
        let checkpoint = self.checkpoint();
        self.state.is_shuffling = !self.state.is_shuffling;
        self.emit(PlayerEvent::ShuffleChanged {
            enabled: self.state.is_shuffling,
        });
        self.finish(checkpoint);
    }

    /// Move to the next episode if there is one. Returns the new index.
    pub(crate) fn advance_next(&mut self) -> Option<usize> {
        let next = if self.avoid_shuffle_repeat {
            navigation::resolve_next_avoiding_repeat(&self.state, &mut self.rng)
        } else {
            navigation::resolve_next(&self.state, &mut self.rng)
        };

        if let Some(index) = next {
            self.move_to(index);
        }
        next
    }

    /// Move to the previous episode if there is one. Returns the new index.
    pub(crate) fn advance_previous(&mut self) -> Option<usize> {
        let previous = navigation::resolve_previous(&self.state);
        if let Some(index) = previous {
            self.move_to(index);
        }
        previous
    }

    // ===== Status reports (no state change) =====

    pub(crate) fn report_position(&mut self, position_secs: u64, duration_secs: u64) {
        self.emit(PlayerEvent::PositionUpdate {
            position_secs,
            duration_secs,
        });
        self.flush();
    }

    pub(crate) fn report_finished(&mut self, episode_id: String) {
        self.emit(PlayerEvent::EpisodeFinished { episode_id });
        self.flush();
    }

    pub(crate) fn report_error(&mut self, message: String) {
        self.emit(PlayerEvent::Error { message });
        self.flush();
    }

    // ===== Internal =====

    fn move_to(&mut self, index: usize) {
        let checkpoint = self.checkpoint();
        self.state.current_index = Some(index);
        self.finish(checkpoint);
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            surface: self.surface_state(),
            episode: self
                .state
                .current_index
                .zip(self.state.current_episode().map(|e| e.id.clone())),
        }
    }

    /// Announce what changed since `before` and deliver all queued events
    fn finish(&mut self, before: Checkpoint) {
        debug_assert!(self.state.is_consistent(), "index out of bounds");

        let after = self.checkpoint();

        if after.episode != before.episode {
            if let Some((index, episode_id)) = after.episode {
                self.emit(PlayerEvent::EpisodeChanged {
                    episode_id,
                    previous_episode_id: before.episode.map(|(_, id)| id),
                    index,
                });
            }
        }

        if after.surface != before.surface {
            self.emit(PlayerEvent::StateChanged {
                state: after.surface,
            });
        }

        self.flush();
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn flush(&mut self) {
        if self.pending_events.is_empty() {
            return;
        }

        let events = std::mem::take(&mut self.pending_events);
        let state = &self.state;

        for event in &events {
            for (_, subscriber) in self.subscribers.iter_mut() {
                subscriber(state, event);
            }
        }
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
