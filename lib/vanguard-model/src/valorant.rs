use crate::label::{BuyTier, Site, ECO_LOADOUT_LIMIT};
use crate::{check_side, MapPoint, SchemaError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValorantMap {
    Ascent,
    Bind,
    Haven,
    Split,
    Icebox,
    Breeze,
    Fracture,
}

impl ValorantMap {
    pub const ALL: [ValorantMap; 7] = [
        ValorantMap::Ascent,
        ValorantMap::Bind,
        ValorantMap::Haven,
        ValorantMap::Split,
        ValorantMap::Icebox,
        ValorantMap::Breeze,
        ValorantMap::Fracture,
    ];

    /// Spike sites that exist on this map.
    pub fn sites(&self) -> &'static [Site] {
        match self {
            ValorantMap::Haven => &Site::ALL,
            _ => &[Site::A, Site::B],
        }
    }
}

impl Display for ValorantMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based, increasing within a match
    pub round_number: u8,
    pub winner: String,
    pub team_loadout_value: u32,
    pub enemy_loadout_value: u32,
    pub is_team_eco: bool,
    pub is_enemy_eco: bool,
    /// `None` when the spike was not planted
    #[serde(default)]
    pub spike_site: Option<Site>,
    #[serde(default)]
    pub spike_coords: Option<MapPoint>,
    pub first_blood_team: String,
    pub first_blood_location: MapPoint,
    /// Seconds
    pub round_duration: u32,
}

impl RoundRecord {
    pub fn spike_planted(&self) -> bool {
        self.spike_site.is_some()
    }

    pub fn team_buy_tier(&self) -> BuyTier {
        BuyTier::from_loadout(self.team_loadout_value)
    }
}

/// One VALORANT match, seen from the scouted team's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValorantMatch {
    pub match_id: String,
    pub date: NaiveDate,
    pub team: String,
    pub opponent: String,
    pub team_score: u8,
    pub enemy_score: u8,
    pub won: bool,
    pub map: ValorantMap,
    #[serde(default)]
    pub rounds: Vec<RoundRecord>,
}

impl ValorantMatch {
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut previous: u8 = 0;
        for round in &self.rounds {
            if previous.checked_add(1) != Some(round.round_number) {
                return Err(SchemaError::RoundOutOfOrder {
                    previous,
                    found: round.round_number,
                });
            }
            previous = round.round_number;

            check_side(&self.team, &round.winner, "round.winner")?;
            check_side(&self.team, &round.first_blood_team, "round.first_blood_team")?;

            if round.is_team_eco != (round.team_loadout_value < ECO_LOADOUT_LIMIT)
                || round.is_enemy_eco != (round.enemy_loadout_value < ECO_LOADOUT_LIMIT)
            {
                return Err(SchemaError::EcoFlagMismatch(round.round_number));
            }
            if round.spike_site.is_some() != round.spike_coords.is_some() {
                return Err(SchemaError::SpikeMismatch(round.round_number));
            }
        }

        Ok(())
    }
}
