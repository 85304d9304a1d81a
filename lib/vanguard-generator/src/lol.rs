use crate::{side_label, WIN_PROBABILITY};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use vanguard_model::label::{DragonType, Lane};
use vanguard_model::lol::{GoldSnapshot, JunglePosition, KillEvent, LolMatch, ObjectiveCapture};
use vanguard_model::MapPoint;

/// Summoner's Rift is roughly 14820 units across.
const MAP_SIZE: i32 = 14820;
const DRAGON_PIT: MapPoint = MapPoint { x: 9800, y: 4200 };
const BARON_PIT: MapPoint = MapPoint { x: 5200, y: 10400 };

/// Dragons respawn every five minutes from 5:00.
const DRAGON_SPAWNS: [u32; 8] = [300, 600, 900, 1200, 1500, 1800, 2100, 2400];
const DRAGON_TAKEN_CHANCE: f64 = 0.8;
const DRAGON_CONTEST_SECS: u32 = 120;
/// Drakes after this many are Elder
const ELEMENTAL_DRAGONS: usize = 4;

const HERALD_SPAWN: u32 = 480;
const HERALD_DESPAWN: u32 = 1185;
const BARON_SPAWN: u32 = 1200;

const GOLD_INTERVAL_MINS: u32 = 5;
const STARTING_GOLD: i64 = 15000;

pub(crate) fn generate_match<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    index: usize,
    date: NaiveDate,
) -> LolMatch {
    let won = rng.gen_bool(WIN_PROBABILITY);
    let duration = rng.gen_range(1500..=2400);

    LolMatch {
        match_id: format!("LOL_{index}"),
        date,
        team: team.to_string(),
        opponent: format!("Team_{index}"),
        won,
        duration,
        kills: kills(rng, team, won, duration),
        dragons: dragons(rng, team, won, duration),
        heralds: heralds(rng, team, won, duration),
        barons: barons(rng, team, won, duration),
        gold_updates: gold_updates(rng, won, duration),
        jungle_positions: jungle_positions(rng, duration),
    }
}

fn kills<R: Rng + ?Sized>(rng: &mut R, team: &str, won: bool, duration: u32) -> Vec<KillEvent> {
    let count = if won {
        rng.gen_range(15..=35)
    } else {
        rng.gen_range(8..=20)
    };
    let team_share = if won { 0.65 } else { 0.4 };

    let mut kills: Vec<KillEvent> = (0..count)
        .map(|_| {
            let by_team = rng.gen_bool(team_share);
            KillEvent {
                // No kills before three minutes
                timestamp: rng.gen_range(180..=duration),
                killer: side_label(team, by_team),
                victim: side_label(team, !by_team),
                x: rng.gen_range(1000..=MAP_SIZE - 1000),
                y: rng.gen_range(1000..=MAP_SIZE - 1000),
                is_first_blood: false,
            }
        })
        .collect();
    kills.sort_by_key(|kill| kill.timestamp);
    if let Some(first) = kills.first_mut() {
        first.is_first_blood = true;
    }
    kills
}

fn dragons<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    won: bool,
    duration: u32,
) -> Vec<ObjectiveCapture> {
    let team_odds = if won { 0.75 } else { 0.35 };
    let mut dragons: Vec<ObjectiveCapture> = Vec::new();

    for spawn in DRAGON_SPAWNS {
        if spawn >= duration || !rng.gen_bool(DRAGON_TAKEN_CHANCE) {
            continue;
        }
        let by_team = rng.gen_bool(team_odds);
        let dragon_type = if dragons.len() < ELEMENTAL_DRAGONS {
            DragonType::ELEMENTAL
                .choose(rng)
                .copied()
                .unwrap_or(DragonType::Cloud)
        } else {
            DragonType::Elder
        };
        dragons.push(ObjectiveCapture {
            timestamp: (spawn + rng.gen_range(0..=DRAGON_CONTEST_SECS)).min(duration),
            team: side_label(team, by_team),
            dragon_type: Some(dragon_type),
            x: DRAGON_PIT.x,
            y: DRAGON_PIT.y,
        });
    }

    dragons.sort_by_key(|dragon| dragon.timestamp);
    dragons
}

fn heralds<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    won: bool,
    duration: u32,
) -> Vec<ObjectiveCapture> {
    if duration <= HERALD_SPAWN {
        return Vec::new();
    }
    let team_odds = if won { 0.7 } else { 0.3 };
    let latest = HERALD_DESPAWN.min(duration);
    pit_captures(rng, team, team_odds, HERALD_SPAWN..=latest)
}

fn barons<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    won: bool,
    duration: u32,
) -> Vec<ObjectiveCapture> {
    if duration <= BARON_SPAWN + 60 {
        return Vec::new();
    }
    let team_odds = if won { 0.8 } else { 0.2 };
    pit_captures(rng, team, team_odds, BARON_SPAWN..=duration - 60)
}

/// Zero to two captures at the top-side pit within `window`.
fn pit_captures<R: Rng + ?Sized>(
    rng: &mut R,
    team: &str,
    team_odds: f64,
    window: std::ops::RangeInclusive<u32>,
) -> Vec<ObjectiveCapture> {
    let count = rng.gen_range(0..=2);
    let mut captures: Vec<ObjectiveCapture> = (0..count)
        .map(|_| ObjectiveCapture {
            timestamp: rng.gen_range(window.clone()),
            team: side_label(team, rng.gen_bool(team_odds)),
            dragon_type: None,
            x: BARON_PIT.x,
            y: BARON_PIT.y,
        })
        .collect();
    captures.sort_by_key(|capture| capture.timestamp);
    captures
}

fn gold_updates<R: Rng + ?Sized>(rng: &mut R, won: bool, duration: u32) -> Vec<GoldSnapshot> {
    let (base, trend_per_minute) = if won { (500, 50) } else { (-500, -50) };

    (GOLD_INTERVAL_MINS..=duration / 60)
        .step_by(GOLD_INTERVAL_MINS as usize)
        .map(|minute| {
            let minute = i64::from(minute);
            let gold_difference = base + rng.gen_range(-300..=300) + minute * trend_per_minute;
            let enemy_gold = STARTING_GOLD + minute * 300;
            GoldSnapshot {
                timestamp: (minute * 60) as u32,
                team_gold: enemy_gold + gold_difference,
                enemy_gold,
                gold_difference,
            }
        })
        .collect()
}

fn jungle_positions<R: Rng + ?Sized>(rng: &mut R, duration: u32) -> Vec<JunglePosition> {
    let count = rng.gen_range(100..=200);
    let mut positions: Vec<JunglePosition> = (0..count)
        .map(|_| {
            let timestamp = rng.gen_range(0..=duration);
            // Top lane above y=10000, bot lane below y=5000, mid in between
            let lane_roll: f64 = rng.gen();
            let (lane, x, y) = if lane_roll < 0.35 {
                (Lane::Top, rng.gen_range(1000..=7000), rng.gen_range(10000..=14000))
            } else if lane_roll < 0.70 {
                (Lane::Mid, rng.gen_range(5000..=10000), rng.gen_range(5000..=10000))
            } else {
                (Lane::Bot, rng.gen_range(8000..=14000), rng.gen_range(1000..=5000))
            };
            JunglePosition {
                timestamp,
                x,
                y,
                lane,
            }
        })
        .collect();
    positions.sort_by_key(|position| position.timestamp);
    positions
}
