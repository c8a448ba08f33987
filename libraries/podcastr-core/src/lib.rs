//! Podcastr Core
//!
//! Domain types shared by the catalog loader, the playback core and the
//! terminal front end.
//!
//! # Example
//!
//! ```rust
//! use podcastr_core::{format_duration, Episode};
//!
//! let episode = Episode::new("a11y", "Acessibilidade", "https://cdn.example.com/a11y.mp3", 3_981);
//! assert_eq!(episode.duration_display, "01:06:21");
//! assert_eq!(format_duration(95), "01:35");
//! ```

#![forbid(unsafe_code)]

mod episode;
mod time;

pub use episode::{Episode, EpisodeId};
pub use time::{format_duration, format_published_at};
