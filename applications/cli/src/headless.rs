//! Simulated media output
//!
//! Stands in for a real audio element: it keeps a play clock that the
//! session advances with [`SimulatedOutput::tick`] and queues the status
//! signals a device would report.

use podcastr_core::Episode;
use podcastr_playback::{MediaOutput, MediaSignal, PlaybackError, Result};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SimulatedOutput {
    /// Media length per URL; unknown media never ends
    lengths: HashMap<String, Duration>,
    /// URLs that fail to load
    unavailable: HashSet<String>,
    loaded: Option<String>,
    playing: bool,
    position: Duration,
    pending_signals: Vec<MediaSignal>,
}

impl SimulatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn media lengths from episode metadata
    pub fn register<'a>(&mut self, episodes: impl IntoIterator<Item = &'a Episode>) {
        for episode in episodes {
            self.lengths
                .insert(episode.media_url.clone(), episode.duration());
        }
    }

    /// Make loads of `url` fail
    pub fn mark_unavailable(&mut self, url: impl Into<String>) {
        self.unavailable.insert(url.into());
    }

    /// Advance the play clock, reporting progress and end of media
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }
        let Some(url) = &self.loaded else {
            return;
        };

        self.position += elapsed;

        match self.lengths.get(url).copied() {
            Some(length) if self.position >= length => {
                self.position = length;
                self.playing = false;
                self.pending_signals.push(MediaSignal::TimeUpdate(length));
                self.pending_signals.push(MediaSignal::Ended);
            }
            _ => self
                .pending_signals
                .push(MediaSignal::TimeUpdate(self.position)),
        }
    }

    /// Take the signals queued since the last call
    pub fn drain_signals(&mut self) -> Vec<MediaSignal> {
        std::mem::take(&mut self.pending_signals)
    }

    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }
}

impl MediaOutput for SimulatedOutput {
    fn load_and_play(&mut self, url: &str) -> Result<()> {
        if self.unavailable.contains(url) {
            self.loaded = None;
            self.playing = false;
            return Err(PlaybackError::Media(format!("cannot open {}", url)));
        }

        debug!(url = %url, "Simulated load");
        self.loaded = Some(url.to_string());
        self.position = Duration::ZERO;
        self.playing = true;
        self.pending_signals.push(MediaSignal::Playing);
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NoEpisodeLoaded);
        }
        self.playing = true;
        self.pending_signals.push(MediaSignal::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.pending_signals.push(MediaSignal::Paused);
        }
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NoEpisodeLoaded);
        }
        self.position = position;
        self.pending_signals.push(MediaSignal::TimeUpdate(position));
        Ok(())
    }

    fn unload(&mut self) {
        self.loaded = None;
        self.playing = false;
        self.position = Duration::ZERO;
    }
}
