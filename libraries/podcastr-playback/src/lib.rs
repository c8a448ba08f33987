//! Podcastr - Playback Management
//!
//! The shared playback state behind every Podcastr surface: catalog rows,
//! the episode detail page and the persistent player bar all issue
//! commands against one store and observe the same state.
//!
//! This crate provides:
//! - Playback state store with subscribe/notify
//! - Navigation resolver (sequential and shuffled next/previous)
//! - Transport commands (`Transport` trait)
//! - Media output binding (diff state, drive the device, feed status back)
//!
//! # Architecture
//!
//! `podcastr-playback` does not decode audio. Platform code implements
//! [`MediaOutput`] and forwards device status as [`MediaSignal`]s.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use podcastr_core::Episode;
//! use podcastr_playback::{PlayerStore, Transport};
//!
//! let mut store = PlayerStore::default();
//!
//! let episodes = vec![
//!     Episode::new("a", "Episode A", "https://cdn.example.com/a.mp3", 1_800),
//!     Episode::new("b", "Episode B", "https://cdn.example.com/b.mp3", 2_400),
//! ];
//!
//! store.play_list(episodes, 0).unwrap();
//! assert!(store.has_next());
//!
//! store.play_next();
//! assert_eq!(store.state().current_index, Some(1));
//! assert!(!store.has_next());
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use podcastr_core::Episode;
//! use podcastr_playback::{MediaOutput, MediaSignal, Player, PlaybackConfig, Result, Transport};
//! use std::time::Duration;
//!
//! struct MyAudioElement;
//!
//! impl MediaOutput for MyAudioElement {
//!     fn load_and_play(&mut self, url: &str) -> Result<()> {
//!         // Hand the URL to the platform player
//!         Ok(())
//!     }
//!
//!     fn resume(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {}
//!
//!     fn seek(&mut self, position: Duration) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn unload(&mut self) {}
//! }
//!
//! let mut player = Player::new(PlaybackConfig::default(), MyAudioElement);
//! player.subscribe(|state, event| println!("{:?} -> {:?}", event, state.current_index));
//!
//! player.play(Episode::new("a", "Episode A", "https://cdn.example.com/a.mp3", 1_800));
//!
//! // From the platform's status callbacks
//! player.handle_signal(MediaSignal::TimeUpdate(Duration::from_secs(1)));
//! player.handle_signal(MediaSignal::Ended);
//! ```

#![forbid(unsafe_code)]

mod binding;
mod error;
mod events;
pub mod navigation;
mod player;
mod store;
mod transport;
pub mod types;

// Public exports
pub use binding::{MediaOutput, MediaSignal, PlayerBinding, SyncOutcome};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use player::Player;
pub use store::{PlayerStore, SubscriptionId};
pub use transport::Transport;
pub use types::{PlaybackConfig, PlaybackState, SurfaceState};
