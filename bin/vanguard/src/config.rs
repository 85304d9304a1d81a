use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tokio::fs::read_to_string;
use vanguard_model::Game;
use vanguard_report::{Credentials, Provider};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub game: Game,
    pub team: String,
    pub matches: usize,
    /// Fixed seed for the synthetic generator. Fresh entropy when absent.
    pub seed: Option<u64>,
    pub use_live_data: bool,
    pub grid_api_key: Option<String>,
    pub llm_provider: String,
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: Game::Lol,
            team: "Cloud9".to_string(),
            matches: 10,
            seed: None,
            use_live_data: false,
            grid_api_key: None,
            llm_provider: "mock".to_string(),
            openai_api_key: None,
            google_api_key: None,
            openrouter_api_key: None,
        }
    }
}

impl Config {
    pub async fn load(path: Option<impl AsRef<Path>>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => Default::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Overwrite fields with whatever `lookup` finds for their environment variable.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(game) = lookup("VANGUARD_GAME") {
            self.game = game.parse().context("VANGUARD_GAME should be lol or valorant")?;
        }
        self.team = lookup("VANGUARD_TEAM").unwrap_or(std::mem::take(&mut self.team));
        if let Some(matches) = lookup("VANGUARD_MATCHES") {
            self.matches = matches
                .trim()
                .parse()
                .context("VANGUARD_MATCHES should be a non-negative integer")?;
        }
        if let Some(seed) = lookup("VANGUARD_SEED") {
            self.seed = Some(seed.trim().parse().context("VANGUARD_SEED should be numeric")?);
        }
        if let Some(flag) = lookup("USE_LIVE_DATA") {
            self.use_live_data = parse_flag(&flag)
                .with_context(|| format!("USE_LIVE_DATA should be true or false, got `{flag}`"))?;
        }
        self.llm_provider = lookup("LLM_PROVIDER").unwrap_or(std::mem::take(&mut self.llm_provider));

        override_key(&mut self.grid_api_key, lookup("GRID_API_KEY"));
        override_key(&mut self.openai_api_key, lookup("OPENAI_API_KEY"));
        override_key(&mut self.google_api_key, lookup("GOOGLE_API_KEY"));
        override_key(&mut self.openrouter_api_key, lookup("OPENROUTER_API_KEY"));

        Ok(())
    }

    pub fn provider(&self) -> anyhow::Result<Provider> {
        Ok(self.llm_provider.parse()?)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            openai_api_key: self.openai_api_key.clone(),
            google_api_key: self.google_api_key.clone(),
            openrouter_api_key: self.openrouter_api_key.clone(),
        }
    }
}

fn override_key(key: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *key = value;
    }
    // Blank keys count as missing
    if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        *key = None;
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
