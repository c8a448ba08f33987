//! Episode domain type

use crate::time::{format_duration, format_published_at};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Episode identifier as issued by the backend (a URL slug)
pub type EpisodeId = String;

/// A single playable podcast episode
///
/// Immutable once loaded. The display fields are computed by the catalog
/// loader so every surface renders the same strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Backend identifier, also used as the detail page slug
    pub id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Participants, as a single display string
    pub members: String,

    /// Cover image URL
    pub thumbnail_url: String,

    /// Audio file URL handed to the media output
    pub media_url: String,

    /// Length of the audio file in whole seconds
    pub duration_secs: u64,

    /// HTML description (detail page only)
    #[serde(default)]
    pub description: Option<String>,

    /// Publication timestamp
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Publication date as shown in listings (`d MMM yy`)
    #[serde(default)]
    pub published_at_display: String,

    /// Duration as shown in listings (`mm:ss` / `hh:mm:ss`)
    #[serde(default)]
    pub duration_display: String,
}

impl Episode {
    /// Create an episode with the minimal fields needed for playback
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        media_url: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            members: String::new(),
            thumbnail_url: String::new(),
            media_url: media_url.into(),
            duration_secs,
            description: None,
            published_at: None,
            published_at_display: String::new(),
            duration_display: format_duration(duration_secs),
        }
    }

    /// Set the participants string
    #[must_use]
    pub fn with_members(mut self, members: impl Into<String>) -> Self {
        self.members = members.into();
        self
    }

    /// Set the cover image URL
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }

    /// Set the publication date and recompute its display string
    #[must_use]
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at_display = format_published_at(&published_at);
        self.published_at = Some(published_at);
        self
    }

    /// Get the episode length as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_computes_duration_display() {
        let episode = Episode::new("ep", "Title", "https://cdn/ep.mp3", 1_800);
        assert_eq!(episode.duration_display, "30:00");
        assert_eq!(episode.duration(), Duration::from_secs(1_800));
        assert!(episode.description.is_none());
    }

    #[test]
    fn builder_sets_published_display() {
        let date = Utc.with_ymd_and_hms(2021, 1, 22, 14, 45, 0).unwrap();
        let episode = Episode::new("ep", "Title", "https://cdn/ep.mp3", 60)
            .with_members("Diego e Richard")
            .with_published_at(date);

        assert_eq!(episode.members, "Diego e Richard");
        assert_eq!(episode.published_at, Some(date));
        assert_eq!(episode.published_at_display, "22 jan 21");
    }

    #[test]
    fn deserializes_without_display_fields() {
        let json = r#"{
            "id": "ep",
            "title": "Title",
            "members": "",
            "thumbnail_url": "",
            "media_url": "https://cdn/ep.mp3",
            "duration_secs": 10
        }"#;

        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.duration_secs, 10);
        assert!(episode.duration_display.is_empty());
    }
}
