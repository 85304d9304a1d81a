use serde::{Deserialize, Serialize};

pub mod error;
pub mod label;
pub mod lol;
pub mod valorant;

pub use error::SchemaError;

/// Label used for every event credited to the side that is not being scouted.
pub const OPPONENT_LABEL: &str = "Enemy Team";

/// Team name reported when there are no matches to take it from.
pub const UNKNOWN_TEAM: &str = "Unknown";

/// Which title a set of matches belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Game {
    #[default]
    Lol,
    Valorant,
}

impl std::str::FromStr for Game {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "lol" | "league" | "league of legends" => Ok(Game::Lol),
            "valorant" | "val" => Ok(Game::Valorant),
            _ => Err(SchemaError::UnknownLabel(value.to_string())),
        }
    }
}

/// A point on a map, in the map's own coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: i32,
    pub y: i32,
}

impl MapPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Check that a side label is either the scouted team or [`OPPONENT_LABEL`].
pub(crate) fn check_side(team: &str, label: &str, field: &'static str) -> Result<(), SchemaError> {
    if label == team || label == OPPONENT_LABEL {
        return Ok(());
    }
    Err(SchemaError::ForeignTeam {
        field,
        label: label.to_string(),
    })
}
