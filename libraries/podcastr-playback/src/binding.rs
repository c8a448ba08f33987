//! Player surface binding
//!
//! Translates `PlaybackState` into imperative calls on the real media
//! output. The binding remembers what it last drew (which episode is
//! loaded, whether it told the output to play) and on every sync issues
//! only the calls needed to catch up with the state.

use crate::{
    error::{PlaybackError, Result},
    types::{PlaybackState, SurfaceState},
};
use podcastr_core::Episode;
use std::time::Duration;
use tracing::{debug, warn};

/// Platform media output
///
/// Implementors wrap whatever actually decodes and plays audio. Status
/// comes back separately as [`MediaSignal`]s.
pub trait MediaOutput {
    /// Load `url` and start playing it from the beginning
    fn load_and_play(&mut self, url: &str) -> Result<()>;

    /// Resume the loaded media
    fn resume(&mut self) -> Result<()>;

    /// Pause the loaded media
    fn pause(&mut self);

    /// Jump to `position` without changing play/pause
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Drop the loaded media
    fn unload(&mut self);
}

/// Status reported by the media output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSignal {
    /// Output started or resumed playing
    Playing,

    /// Output paused
    Paused,

    /// Media reached its natural end
    Ended,

    /// Playback position advanced
    TimeUpdate(Duration),

    /// Media failed to load or play
    Failed(String),
}

/// What a sync did to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing needed doing
    Unchanged,
    /// A new episode was loaded (and autoplayed)
    Loaded,
    /// Loaded episode resumed
    Resumed,
    /// Loaded episode paused
    Paused,
    /// Output emptied
    Unloaded,
}

#[derive(Debug, Clone)]
struct LoadedEpisode {
    id: String,
    url: String,
    duration: Duration,
}

impl LoadedEpisode {
    fn matches(&self, episode: &Episode) -> bool {
        self.id == episode.id && self.url == episode.media_url
    }
}

/// Diffing bridge between the store and a [`MediaOutput`]
#[derive(Debug)]
pub struct PlayerBinding<O: MediaOutput> {
    output: O,
    loaded: Option<LoadedEpisode>,
    // Last play/pause the output was told (or reported)
    playing: bool,
    position: Duration,
    // Episode whose load failed; not reloaded until play is requested again
    failed: Option<String>,
}

impl<O: MediaOutput> PlayerBinding<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            loaded: None,
            playing: false,
            position: Duration::ZERO,
            failed: None,
        }
    }

    /// Bring the output in line with `state`
    pub fn sync(&mut self, state: &PlaybackState) -> Result<SyncOutcome> {
        let Some(episode) = state.current_episode() else {
            self.failed = None;
            if self.loaded.take().is_some() {
                debug!("Unloading media output");
                self.output.unload();
                self.playing = false;
                self.position = Duration::ZERO;
                return Ok(SyncOutcome::Unloaded);
            }
            return Ok(SyncOutcome::Unchanged);
        };

        let same_episode = self
            .loaded
            .as_ref()
            .is_some_and(|loaded| loaded.matches(episode));

        if !same_episode {
            if self.failed.as_deref() == Some(episode.id.as_str()) && !state.is_playing {
                return Ok(SyncOutcome::Unchanged);
            }
            return self.load(episode);
        }

        match (state.is_playing, self.playing) {
            (true, false) => {
                debug!(episode_id = %episode.id, "Resuming media output");
                if let Err(e) = self.output.resume() {
                    self.playing = false;
                    return Err(e);
                }
                self.playing = true;
                Ok(SyncOutcome::Resumed)
            }
            (false, true) => {
                debug!(episode_id = %episode.id, "Pausing media output");
                self.output.pause();
                self.playing = false;
                Ok(SyncOutcome::Paused)
            }
            _ => Ok(SyncOutcome::Unchanged),
        }
    }

    /// Replay the loaded episode from the start
    pub fn restart(&mut self) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NoEpisodeLoaded);
        }

        self.output.seek(Duration::ZERO)?;
        self.position = Duration::ZERO;
        if let Err(e) = self.output.resume() {
            self.playing = false;
            return Err(e);
        }
        self.playing = true;
        Ok(())
    }

    /// Seek within the loaded episode; play/pause is left alone
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Err(PlaybackError::NoEpisodeLoaded);
        };
        if position > loaded.duration {
            return Err(PlaybackError::InvalidSeekPosition(position));
        }

        self.output.seek(position)?;
        self.position = position;
        Ok(())
    }

    /// Record a play/pause status reported by the output
    pub fn note_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Record a position reported by the output
    pub fn note_position(&mut self, position: Duration) {
        self.position = position;
    }

    /// Record that the output failed on the loaded episode
    pub fn note_failure(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            self.failed = Some(loaded.id);
        }
        self.playing = false;
    }

    pub fn surface_state(&self) -> SurfaceState {
        match (&self.loaded, &self.failed) {
            (None, None) => SurfaceState::Idle,
            (Some(_), _) if self.playing => SurfaceState::LoadedPlaying,
            _ => SurfaceState::LoadedPaused,
        }
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Length of the loaded episode
    pub fn duration(&self) -> Option<Duration> {
        self.loaded.as_ref().map(|l| l.duration)
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn load(&mut self, episode: &Episode) -> Result<SyncOutcome> {
        debug!(episode_id = %episode.id, url = %episode.media_url, "Loading episode");
        self.position = Duration::ZERO;

        match self.output.load_and_play(&episode.media_url) {
            Ok(()) => {
                self.loaded = Some(LoadedEpisode {
                    id: episode.id.clone(),
                    url: episode.media_url.clone(),
                    duration: episode.duration(),
                });
                self.playing = true;
                self.failed = None;
                Ok(SyncOutcome::Loaded)
            }
            Err(e) => {
                warn!(episode_id = %episode.id, error = %e, "Failed to load episode");
                self.loaded = None;
                self.playing = false;
                self.failed = Some(episode.id.clone());
                Err(e)
            }
        }
    }
}
