//! Backend record -> `Episode` normalization.

use crate::types::ApiEpisode;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use podcastr_core::{format_duration, format_published_at, Episode};
use tracing::warn;

/// Accepted layouts for `published_at` besides RFC 3339
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a backend timestamp; naive times are taken as UTC
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Convert a backend record, computing the display fields
pub fn normalize_episode(raw: ApiEpisode) -> Episode {
    let published_at = parse_published_at(&raw.published_at);
    if published_at.is_none() {
        warn!(episode_id = %raw.id, published_at = %raw.published_at, "Unparseable publication date");
    }

    Episode {
        published_at_display: published_at
            .as_ref()
            .map(format_published_at)
            .unwrap_or_default(),
        duration_display: format_duration(raw.file.duration),
        id: raw.id,
        title: raw.title,
        members: raw.members,
        thumbnail_url: raw.thumbnail,
        media_url: raw.file.url,
        duration_secs: raw.file.duration,
        description: raw.description,
        published_at,
    }
}
