/// Application configuration
use crate::error::{ConfigError, Result};
use podcastr_catalog::CatalogConfig;
use podcastr_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "podcastr.toml";

const ENV_PREFIX: &str = "PODCASTR";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_player")]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_episode_limit")]
    pub episode_limit: usize,

    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Fixed seed for shuffle draws (random when unset)
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Never let a shuffle draw pick the current episode
    #[serde(default)]
    pub avoid_shuffle_repeat: bool,

    /// Simulated playback clock resolution
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl AppConfig {
    /// Load from the config file (explicit path or `podcastr.toml`) and
    /// `PODCASTR_*` environment variables, e.g. `PODCASTR_API__BASE_URL`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        // An explicit path must exist, the default file is optional
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        settings = settings.add_source(config::File::from(file).required(required));

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }

        if self.api.episode_limit == 0 {
            return Err(ConfigError::Invalid(
                "api.episode_limit must be at least 1".to_string(),
            ));
        }

        if self.player.tick_millis == 0 {
            return Err(ConfigError::Invalid(
                "player.tick_millis must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            episode_limit: self.api.episode_limit,
            latest_count: self.api.latest_count,
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            shuffle_seed: self.player.shuffle_seed,
            avoid_shuffle_repeat: self.player.avoid_shuffle_repeat,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.player.tick_millis)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            player: default_player(),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        episode_limit: default_episode_limit(),
        latest_count: default_latest_count(),
    }
}

fn default_base_url() -> String {
    "http://localhost:3333/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_episode_limit() -> usize {
    12
}

fn default_latest_count() -> usize {
    2
}

fn default_player() -> PlayerSettings {
    PlayerSettings {
        shuffle_seed: None,
        avoid_shuffle_repeat: false,
        tick_millis: default_tick_millis(),
    }
}

fn default_tick_millis() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:3333/");
        assert_eq!(config.api.episode_limit, 12);
        assert_eq!(config.api.latest_count, 2);
        assert!(config.player.shuffle_seed.is_none());
        assert!(!config.player.avoid_shuffle_repeat);
        assert_eq!(config.tick(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_toml_file() {
        let file = write_config(
            r#"
[api]
base_url = "https://podcastr.example.com/api"
latest_count = 3

[player]
shuffle_seed = 42
avoid_shuffle_repeat = true
"#,
        );

        let config = AppConfig::load_with_prefix(Some(file.path()), "PODCASTR_TEST_FILE").unwrap();

        assert_eq!(config.api.base_url, "https://podcastr.example.com/api");
        assert_eq!(config.api.latest_count, 3);
        assert_eq!(config.api.episode_limit, 12);
        assert_eq!(config.player.shuffle_seed, Some(42));
        assert!(config.player.avoid_shuffle_repeat);
        assert_eq!(config.player.tick_millis, 1000);
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[api]\nepisode_limit = 5\n");
        std::env::set_var("PODCASTR_TEST_ENV_API__EPISODE_LIMIT", "20");
        std::env::set_var("PODCASTR_TEST_ENV_PLAYER__TICK_MILLIS", "250");

        let config = AppConfig::load_with_prefix(Some(file.path()), "PODCASTR_TEST_ENV").unwrap();

        assert_eq!(config.api.episode_limit, 20);
        assert_eq!(config.player.tick_millis, 250);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load_with_prefix(
            Some(Path::new("/nonexistent/podcastr.toml")),
            "PODCASTR_TEST_MISSING",
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = AppConfig::default();
        config.api.base_url = "localhost:3333".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.player.tick_millis = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn converts_to_library_configs() {
        let mut config = AppConfig::default();
        config.player.shuffle_seed = Some(7);

        let catalog = config.catalog_config();
        assert_eq!(catalog.url, "http://localhost:3333/");
        assert_eq!(catalog.timeout, Duration::from_secs(30));

        let playback = config.playback_config();
        assert_eq!(playback.shuffle_seed, Some(7));
    }
}
