use crate::label::{DragonType, Lane};
use crate::{check_side, SchemaError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub timestamp: u32,
    pub killer: String,
    pub victim: String,
    pub x: i32,
    pub y: i32,
    pub is_first_blood: bool,
}

/// A dragon, herald or baron capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveCapture {
    pub timestamp: u32,
    pub team: String,
    /// Only set for dragons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dragon_type: Option<DragonType>,
    pub x: i32,
    pub y: i32,
}

/// Gold standing at a point in time. Snapshots are not evenly spaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldSnapshot {
    pub timestamp: u32,
    pub team_gold: i64,
    pub enemy_gold: i64,
    /// Team gold minus enemy gold
    pub gold_difference: i64,
}

/// A sampled jungler position. The lane label is trusted as-is by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JunglePosition {
    pub timestamp: u32,
    pub x: i32,
    pub y: i32,
    pub lane: Lane,
}

/// One League of Legends match, seen from the scouted team's side. Every
/// nested sequence is sorted by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LolMatch {
    pub match_id: String,
    pub date: NaiveDate,
    pub team: String,
    pub opponent: String,
    pub won: bool,
    /// Seconds
    pub duration: u32,
    #[serde(default)]
    pub kills: Vec<KillEvent>,
    #[serde(default)]
    pub dragons: Vec<ObjectiveCapture>,
    #[serde(default)]
    pub heralds: Vec<ObjectiveCapture>,
    #[serde(default)]
    pub barons: Vec<ObjectiveCapture>,
    #[serde(default)]
    pub gold_updates: Vec<GoldSnapshot>,
    #[serde(default)]
    pub jungle_positions: Vec<JunglePosition>,
}

impl LolMatch {
    /// Check the record invariants: every nested timestamp lies within the
    /// match and every side label is the team or the opponent sentinel.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let timestamps = self
            .kills
            .iter()
            .map(|kill| ("kill", kill.timestamp))
            .chain(self.dragons.iter().map(|o| ("dragon", o.timestamp)))
            .chain(self.heralds.iter().map(|o| ("herald", o.timestamp)))
            .chain(self.barons.iter().map(|o| ("baron", o.timestamp)))
            .chain(self.gold_updates.iter().map(|g| ("gold snapshot", g.timestamp)))
            .chain(
                self.jungle_positions
                    .iter()
                    .map(|p| ("jungle position", p.timestamp)),
            );
        for (field, timestamp) in timestamps {
            if timestamp > self.duration {
                return Err(SchemaError::TimestampOutOfRange {
                    field,
                    timestamp,
                    duration: self.duration,
                });
            }
        }

        for kill in &self.kills {
            check_side(&self.team, &kill.killer, "kill.killer")?;
            check_side(&self.team, &kill.victim, "kill.victim")?;
        }
        let objectives = [
            ("dragon.team", &self.dragons),
            ("herald.team", &self.heralds),
            ("baron.team", &self.barons),
        ];
        for (field, captures) in objectives {
            for capture in captures {
                check_side(&self.team, &capture.team, field)?;
            }
        }

        Ok(())
    }
}
