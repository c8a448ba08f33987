//! Wire types for the episode backend and client configuration.

use podcastr_core::Episode;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Backend base URL (e.g. `http://localhost:3333/`)
    pub url: String,

    /// Request timeout
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Episodes requested for listings
    #[serde(default = "default_episode_limit")]
    pub episode_limit: usize,

    /// Episodes shown as "latest releases" on the homepage
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
}

impl CatalogConfig {
    /// Configuration with default limits for the given backend
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: default_timeout(),
            episode_limit: default_episode_limit(),
            latest_count: default_latest_count(),
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_episode_limit() -> usize {
    12
}

fn default_latest_count() -> usize {
    2
}

/// Episode record as the backend serves it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: Option<String>,
    pub published_at: String,
    pub file: ApiFile,
}

/// Audio file attached to an episode
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiFile {
    pub url: String,

    /// Length in seconds; the backend sends either a number or a numeric string
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub duration: u64,
}

/// Homepage sections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Homepage {
    /// Newest episodes, shown as cards
    pub latest: Vec<Episode>,

    /// Remaining episodes, shown as a table
    pub all: Vec<Episode>,
}

impl Homepage {
    /// Split a newest-first listing after `latest_count` episodes
    pub fn split(mut episodes: Vec<Episode>, latest_count: usize) -> Self {
        let all = episodes.split_off(latest_count.min(episodes.len()));
        Self {
            latest: episodes,
            all,
        }
    }

    /// Every episode on the page, in display order
    pub fn episodes(&self) -> Vec<Episode> {
        self.latest.iter().chain(&self.all).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty() && self.all.is_empty()
    }
}

fn deserialize_duration_secs<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    let seconds = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => return Ok(n),
        Raw::Float(f) => f,
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid duration: {:?}", s)))?,
    };

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(de::Error::custom(format!("invalid duration: {}", seconds)));
    }
    Ok(seconds.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_json(duration: &str) -> String {
        format!(
            r#"{{"url": "https://cdn/ep.mp3", "type": "audio/mpeg", "duration": {}}}"#,
            duration
        )
    }

    #[test]
    fn duration_accepts_numbers_and_strings() {
        let int: ApiFile = serde_json::from_str(&file_json("3981")).unwrap();
        let float: ApiFile = serde_json::from_str(&file_json("3981.4")).unwrap();
        let text: ApiFile = serde_json::from_str(&file_json("\"3981\"")).unwrap();

        assert_eq!(int.duration, 3981);
        assert_eq!(float.duration, 3981);
        assert_eq!(text.duration, 3981);
    }

    #[test]
    fn duration_rejects_garbage() {
        assert!(serde_json::from_str::<ApiFile>(&file_json("\"long\"")).is_err());
        assert!(serde_json::from_str::<ApiFile>(&file_json("-5")).is_err());
    }

    #[test]
    fn default_config() {
        let config = CatalogConfig::new("http://localhost:3333/");
        assert_eq!(config.episode_limit, 12);
        assert_eq!(config.latest_count, 2);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn homepage_split() {
        let episodes: Vec<Episode> = (0..5)
            .map(|i| Episode::new(i.to_string(), "t", "https://cdn/x.mp3", 1))
            .collect();

        let page = Homepage::split(episodes.clone(), 2);
        assert_eq!(page.latest.len(), 2);
        assert_eq!(page.all.len(), 3);
        assert_eq!(page.episodes(), episodes);

        let short = Homepage::split(episodes[..1].to_vec(), 2);
        assert_eq!(short.latest.len(), 1);
        assert!(short.all.is_empty());
    }
}
