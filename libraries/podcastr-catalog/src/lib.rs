//! Podcastr Catalog
//!
//! HTTP client for the Podcastr episode backend.
//!
//! # Features
//!
//! - **Listing**: newest episodes, sorted by publication date
//! - **Detail**: a single episode with its description
//! - **Homepage**: newest episodes split into "latest releases" and "all episodes"
//! - **Normalization**: backend records become `podcastr_core::Episode`
//!   with display strings precomputed
//!
//! # Example
//!
//! ```ignore
//! use podcastr_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("http://localhost:3333/"))?;
//!
//!     let homepage = client.homepage().await?;
//!     for episode in &homepage.latest {
//!         println!("{} ({})", episode.title, episode.duration_display);
//!     }
//!
//!     let detail = client.episode("a-importancia-da-contribuicao-em-open-source").await?;
//!     println!("{}", detail.members);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod normalize;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use normalize::{normalize_episode, parse_published_at};
pub use types::{ApiEpisode, ApiFile, CatalogConfig, Homepage};
