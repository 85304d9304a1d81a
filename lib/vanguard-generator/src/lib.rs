use chrono::{NaiveDate, TimeDelta, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use vanguard_model::lol::LolMatch;
use vanguard_model::valorant::ValorantMatch;

mod lol;
mod relabel;
mod valorant;

pub use relabel::{relabel_win_rate, Outcome};

/// Chance that any generated match is a win for the scouted team.
pub const WIN_PROBABILITY: f64 = 0.7;

/// Days between consecutive generated League of Legends matches.
pub const LOL_CADENCE_DAYS: i64 = 3;

/// Days between consecutive generated VALORANT matches.
pub const VALORANT_CADENCE_DAYS: i64 = 2;

/// Generator of synthetic, internally consistent match histories.
///
/// Every random draw goes through the injected RNG, so two generators built
/// from the same seed and anchor produce identical match lists.
#[derive(Debug, Clone)]
pub struct MatchGenerator<R: Rng> {
    rng: R,
    anchor: NaiveDate,
}

impl MatchGenerator<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> MatchGenerator<R> {
    /// Create a generator whose newest match is dated today.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            anchor: Utc::now().date_naive(),
        }
    }

    /// Pin the date of the newest generated match.
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Generate `count` League of Legends matches, newest first.
    pub fn lol_matches(&mut self, team: &str, count: usize) -> Vec<LolMatch> {
        debug!("Generating {count} LoL matches for {team}");
        let anchor = self.anchor;
        (1..=count)
            .map(|index| {
                let date = date_of(anchor, index, LOL_CADENCE_DAYS);
                lol::generate_match(&mut self.rng, team, index, date)
            })
            .collect()
    }

    /// Generate `count` VALORANT matches, newest first.
    pub fn valorant_matches(&mut self, team: &str, count: usize) -> Vec<ValorantMatch> {
        debug!("Generating {count} VALORANT matches for {team}");
        let anchor = self.anchor;
        (1..=count)
            .map(|index| {
                let date = date_of(anchor, index, VALORANT_CADENCE_DAYS);
                valorant::generate_match(&mut self.rng, team, index, date)
            })
            .collect()
    }
}

/// Match `index` (1-based) is dated `index - 1` cadences before the anchor.
fn date_of(anchor: NaiveDate, index: usize, cadence_days: i64) -> NaiveDate {
    anchor - TimeDelta::days((index as i64 - 1) * cadence_days)
}

/// Label for whichever side took an event.
fn side_label(team: &str, taken_by_team: bool) -> String {
    if taken_by_team {
        team.to_string()
    } else {
        vanguard_model::OPPONENT_LABEL.to_string()
    }
}
