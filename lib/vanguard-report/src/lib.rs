use serde::Serialize;
use vanguard_analysis::{LolReport, ValorantReport};
use vanguard_model::Game;

pub mod error;
pub mod llm;
pub mod prompt;
pub mod template;

pub use llm::{Credentials, Provider, ScoutAgent};

/// Aggregated statistics for one team, tagged with the game they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoutingStats {
    Lol(LolReport),
    Valorant(ValorantReport),
}

impl ScoutingStats {
    pub fn game(&self) -> Game {
        match self {
            ScoutingStats::Lol(_) => Game::Lol,
            ScoutingStats::Valorant(_) => Game::Valorant,
        }
    }

    pub fn team_name(&self) -> &str {
        match self {
            ScoutingStats::Lol(report) => &report.team_name,
            ScoutingStats::Valorant(report) => &report.team_name,
        }
    }
}

impl From<LolReport> for ScoutingStats {
    fn from(report: LolReport) -> Self {
        ScoutingStats::Lol(report)
    }
}

impl From<ValorantReport> for ScoutingStats {
    fn from(report: ValorantReport) -> Self {
        ScoutingStats::Valorant(report)
    }
}
