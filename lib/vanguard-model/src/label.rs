use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Loadout value below which a round counts as an eco round.
pub const ECO_LOADOUT_LIMIT: u32 = 2000;

/// Loadout value from which a round counts as a full buy.
pub const FULL_BUY_LOADOUT: u32 = 3500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Top,
    Mid,
    Bot,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Top, Lane::Mid, Lane::Bot];
}

impl FromStr for Lane {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Accept both the short labels and the Riot API position names
        match value.to_lowercase().as_str() {
            "top" => Ok(Lane::Top),
            "mid" | "middle" => Ok(Lane::Mid),
            "bot" | "bottom" => Ok(Lane::Bot),
            _ => Err(SchemaError::UnknownLabel(value.to_string())),
        }
    }
}

impl Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Lane::Top => "Top",
            Lane::Mid => "Mid",
            Lane::Bot => "Bot",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    A,
    B,
    C,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::A, Site::B, Site::C];
}

impl FromStr for Site {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "A" => Ok(Site::A),
            "B" => Ok(Site::B),
            "C" => Ok(Site::C),
            _ => Err(SchemaError::UnknownLabel(value.to_string())),
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Site::A => "A",
            Site::B => "B",
            Site::C => "C",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragonType {
    Cloud,
    Infernal,
    Ocean,
    Mountain,
    Elder,
}

impl DragonType {
    pub const ELEMENTAL: [DragonType; 4] = [
        DragonType::Cloud,
        DragonType::Infernal,
        DragonType::Ocean,
        DragonType::Mountain,
    ];
}

/// Spend tier of a round, judged from one side's loadout value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyTier {
    Eco,
    Force,
    FullBuy,
}

impl BuyTier {
    pub fn from_loadout(loadout: u32) -> Self {
        if loadout < ECO_LOADOUT_LIMIT {
            BuyTier::Eco
        } else if loadout < FULL_BUY_LOADOUT {
            BuyTier::Force
        } else {
            BuyTier::FullBuy
        }
    }
}
