use crate::{side_label, WIN_PROBABILITY};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use vanguard_model::label::{BuyTier, Site, ECO_LOADOUT_LIMIT};
use vanguard_model::valorant::{RoundRecord, ValorantMap, ValorantMatch};
use vanguard_model::MapPoint;

/// Rounds needed to win in regulation.
const ROUNDS_TO_WIN: u8 = 13;
/// Pistol rounds open each half.
const PISTOL_ROUNDS: [u8; 2] = [1, 13];
const PISTOL_LOADOUT: u32 = 800;

const PLANT_CHANCE: f64 = 0.85;
/// Chance the round winner was also credited with first blood
const FIRST_BLOOD_WINNER_ODDS: f64 = 0.65;

pub(crate) fn generate_match<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    index: usize,
    date: NaiveDate,
) -> ValorantMatch {
    let won = rng.gen_bool(WIN_PROBABILITY);

    // A 12-12 score forces overtime, which ends two rounds clear
    let loser_score = rng.gen_range(5..=12);
    let overtime = loser_score == ROUNDS_TO_WIN - 1;
    let winner_score = if overtime {
        ROUNDS_TO_WIN + 1
    } else {
        ROUNDS_TO_WIN
    };
    let (team_score, enemy_score) = if won {
        (winner_score, loser_score)
    } else {
        (loser_score, winner_score)
    };

    let map = *ValorantMap::ALL
        .choose(rng)
        .unwrap_or(&ValorantMap::Ascent);
    let rounds = round_winners(rng, won, loser_score, overtime)
        .into_iter()
        .zip(1..)
        .map(|(round_won, round_number)| generate_round(rng, team, map, round_number, round_won))
        .collect();

    ValorantMatch {
        match_id: format!("VAL_{index}"),
        date,
        team: team.to_string(),
        opponent: format!("Team_{index}"),
        team_score,
        enemy_score,
        won,
        map,
        rounds,
    }
}

/// Order of round results from the team's point of view. Neither side reaches
/// the winning score before the final round.
fn round_winners<R: Rng + ?Sized>(
    rng: &mut R,
    won: bool,
    loser_score: u8,
    overtime: bool,
) -> Vec<bool> {
    let winner_rounds_before_end = ROUNDS_TO_WIN - 1;
    let mut results: Vec<bool> = std::iter::repeat(won)
        .take(winner_rounds_before_end.into())
        .chain(std::iter::repeat(!won).take(loser_score.into()))
        .collect();
    results.shuffle(rng);

    if overtime {
        results.push(won);
    }
    results.push(won);
    results
}

fn generate_round<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    map: ValorantMap,
    round_number: u8,
    round_won: bool,
) -> RoundRecord {
    let (team_loadout_value, enemy_loadout_value) = if PISTOL_ROUNDS.contains(&round_number) {
        (PISTOL_LOADOUT, PISTOL_LOADOUT)
    } else {
        (loadout(rng), loadout(rng))
    };

    let spike_site = if rng.gen_bool(PLANT_CHANCE) {
        map.sites().choose(rng).copied()
    } else {
        None
    };
    let spike_coords = spike_site.map(|site| site_coords(rng, site));

    let team_first_blood = if round_won {
        rng.gen_bool(FIRST_BLOOD_WINNER_ODDS)
    } else {
        rng.gen_bool(1.0 - FIRST_BLOOD_WINNER_ODDS)
    };

    RoundRecord {
        round_number,
        winner: side_label(team, round_won),
        team_loadout_value,
        enemy_loadout_value,
        is_team_eco: team_loadout_value < ECO_LOADOUT_LIMIT,
        is_enemy_eco: enemy_loadout_value < ECO_LOADOUT_LIMIT,
        spike_site,
        spike_coords,
        first_blood_team: side_label(team, team_first_blood),
        first_blood_location: MapPoint::new(rng.gen_range(10..=90), rng.gen_range(10..=90)),
        round_duration: rng.gen_range(30..=100),
    }
}

/// Loadout for a non-pistol round: 20% eco, 30% force, 50% full buy.
fn loadout<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let tier = match rng.gen_range(0..100) {
        0..=19 => BuyTier::Eco,
        20..=49 => BuyTier::Force,
        _ => BuyTier::FullBuy,
    };
    match tier {
        BuyTier::Eco => rng.gen_range(800..=1500),
        BuyTier::Force => rng.gen_range(2000..=3000),
        BuyTier::FullBuy => rng.gen_range(3500..=5000),
    }
}

fn site_coords<R: Rng + ?Sized>(rng: &mut R, site: Site) -> MapPoint {
    let (x, y) = match site {
        Site::A => (20..=35, 40..=55),
        Site::B => (55..=70, 20..=35),
        Site::C => (40..=55, 60..=75),
    };
    MapPoint::new(rng.gen_range(x), rng.gen_range(y))
}
