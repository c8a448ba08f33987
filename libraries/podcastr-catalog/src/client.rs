//! Catalog client.

use crate::error::{CatalogError, Result};
use crate::normalize::normalize_episode;
use crate::types::{ApiEpisode, CatalogConfig, Homepage};
use podcastr_core::Episode;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the episode backend.
///
/// Fetches and normalizes episodes; it does not cache or paginate.
///
/// # Example
///
/// ```ignore
/// use podcastr_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::new("http://localhost:3333/"))?;
/// let episodes = client.latest_episodes(12).await?;
/// println!("Found {} episodes", episodes.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let mut base_url = Url::parse(config.url.trim())
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Podcastr/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// The normalized backend URL (always ends with `/`).
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Newest `limit` episodes, most recent first.
    pub async fn latest_episodes(&self, limit: usize) -> Result<Vec<Episode>> {
        let url = self.episodes_url(None)?;
        debug!(url = %url, limit, "Fetching episodes");

        let response = self
            .http
            .get(url)
            .query(&[
                ("_limit", limit.to_string()),
                ("_sort", "published_at".to_string()),
                ("_order", "desc".to_string()),
            ])
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response, None).await?;
        let raw: Vec<ApiEpisode> = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse episode list: {}", e))
        })?;

        let episodes: Vec<Episode> = raw.into_iter().map(normalize_episode).collect();
        debug!(count = episodes.len(), "Fetched episodes");

        Ok(episodes)
    }

    /// A single episode, including its description.
    pub async fn episode(&self, id: &str) -> Result<Episode> {
        let url = self.episodes_url(Some(id))?;
        debug!(url = %url, episode_id = %id, "Fetching episode");

        let response = self.http.get(url).send().await.map_err(map_send_error)?;
        let response = check_status(response, Some(id)).await?;

        let raw: ApiEpisode = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse episode {}: {}", id, e))
        })?;

        Ok(normalize_episode(raw))
    }

    /// Newest episodes split into the homepage's two sections.
    pub async fn homepage(&self) -> Result<Homepage> {
        let episodes = self.latest_episodes(self.config.episode_limit).await?;
        let page = Homepage::split(episodes, self.config.latest_count);

        info!(
            latest = page.latest.len(),
            all = page.all.len(),
            "Loaded homepage"
        );

        Ok(page)
    }

    fn episodes_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| CatalogError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("episodes");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

fn map_send_error(e: reqwest::Error) -> CatalogError {
    if e.is_connect() || e.is_timeout() {
        CatalogError::Unreachable(e.to_string())
    } else {
        CatalogError::Request(e)
    }
}

async fn check_status(response: Response, id: Option<&str>) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(CatalogError::NotFound(id.to_string()));
        }
    }

    let message = response.text().await.unwrap_or_default();
    Err(CatalogError::ServerError {
        status: status.as_u16(),
        message,
    })
}
