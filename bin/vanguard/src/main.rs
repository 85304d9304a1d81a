use anyhow::Context as _;
use config::Config;
use loader::GridDataLoader;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vanguard_analysis::{analyze_lol_team, analyze_valorant_team};
use vanguard_generator::MatchGenerator;
use vanguard_model::Game;
use vanguard_report::{ScoutAgent, ScoutingStats};

mod config;
mod loader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    setup_tracing_subscriber();
    if let Err(e) = dotenv {
        debug!("No .env loaded: {e}");
    }

    info!("Loading configuration");
    let config = Config::load(std::env::args().nth(1))
        .await
        .context("Failed to load configuration")?;
    let provider = config.provider().context("Invalid LLM_PROVIDER")?;

    let generator = match config.seed {
        Some(seed) => MatchGenerator::seeded(seed),
        None => MatchGenerator::from_entropy(),
    };
    let mut loader = if config.use_live_data {
        info!("Using GRID statistics feed");
        GridDataLoader::live(generator, config.grid_api_key.clone())
    } else {
        info!("Using synthetic match data");
        GridDataLoader::synthetic(generator)
    };

    info!(
        "Analyzing {} recent {:?} matches for {}",
        config.matches, config.game, config.team
    );
    let stats: ScoutingStats = match config.game {
        Game::Lol => {
            let matches = loader.load_lol_matches(&config.team, config.matches).await;
            analyze_lol_team(&matches).into()
        }
        Game::Valorant => {
            let matches = loader
                .load_valorant_matches(&config.team, config.matches)
                .await;
            analyze_valorant_team(&matches).into()
        }
    };

    info!("Writing scouting report with {provider} provider");
    let agent = ScoutAgent::new(provider, config.credentials());
    let report = agent.scouting_report(&stats).await;

    println!("{report}");
    Ok(())
}

fn setup_tracing_subscriber() {
    let layer = fmt::layer()
        .pretty()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_thread_ids(false)
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(EnvFilter::from_default_env())
        .init();
}
