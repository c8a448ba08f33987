//! Podcastr terminal front end
//!
//! Renders the catalog pages as text and runs an interactive player
//! session against a simulated media output.

pub mod config;
pub mod error;
pub mod headless;
pub mod render;
pub mod session;

pub use config::AppConfig;
pub use error::ConfigError;
pub use headless::SimulatedOutput;
pub use session::{Command, Flow, Session};
