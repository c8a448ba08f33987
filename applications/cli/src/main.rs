/// Podcastr - browse the episode catalog and listen from the terminal
use clap::{Parser, Subcommand};
use podcastr_catalog::CatalogClient;
use podcastr_cli::{render, session, AppConfig, Session};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr", version)]
#[command(about = "Podcastr episode browser and player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./podcastr.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL, overrides the configuration
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the homepage: latest releases and all episodes
    List,
    /// Show a single episode
    Show {
        /// Episode id (slug)
        id: String,
    },
    /// Start an interactive player session
    Play {
        /// Episode to start with
        id: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, the pages to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "podcastr=info,podcastr_cli=info,podcastr_playback=info,podcastr_catalog=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        config.validate()?;
    }
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let client = CatalogClient::new(config.catalog_config())?;

    match cli.command {
        Commands::List => {
            let page = client.homepage().await?;
            print!("{}", render::homepage(&page));
        }
        Commands::Show { id } => {
            let episode = client.episode(&id).await?;
            print!("{}", render::episode_detail(&episode));
        }
        Commands::Play { id } => {
            play(&client, &config, id).await?;
        }
    }

    Ok(())
}

async fn play(client: &CatalogClient, config: &AppConfig, id: Option<String>) -> anyhow::Result<()> {
    let page = client.homepage().await?;
    print!("{}", render::homepage(&page));
    println!();
    println!("{}", session::HELP);
    println!();

    let mut session = Session::new(config.playback_config(), page.episodes());

    if let Some(id) = id {
        let episode = client.episode(&id).await?;
        tracing::info!(episode_id = %episode.id, "Starting with episode");
        session.play_episode(episode);
        session.take_events();
    }

    session::run(session, config.tick()).await
}
