use crate::counter::OrderedCounter;
use crate::rate::{mean, percent, round_to};
use serde::Serialize;
use tracing::debug;
use vanguard_model::label::Lane;
use vanguard_model::lol::{LolMatch, ObjectiveCapture};
use vanguard_model::UNKNOWN_TEAM;

/// Minutes at which gold standings are compared.
const GOLD_CHECKPOINT_MINUTES: [u32; 3] = [10, 15, 20];
/// A snapshot counts towards a checkpoint when it is this close to it.
const GOLD_WINDOW_SECS: u32 = 60;

/// First-dragon rate above which early objective control is called dominant.
const DOMINANT_FIRST_DRAGON_RATE: f64 = 70.0;

/// Raw jungler coordinates for heatmap rendering, in sample order.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HeatmapData {
    pub x: Vec<i32>,
    pub y: Vec<i32>,
    pub lane: Vec<Lane>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JungleProximity {
    pub top_lane_percent: f64,
    pub mid_lane_percent: f64,
    pub bot_lane_percent: f64,
    pub total_samples: usize,
    pub heatmap_data: HeatmapData,
    pub insight: String,
}

impl JungleProximity {
    pub fn lane_percent(&self, lane: Lane) -> f64 {
        match lane {
            Lane::Top => self.top_lane_percent,
            Lane::Mid => self.mid_lane_percent,
            Lane::Bot => self.bot_lane_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveControl {
    pub first_dragon_rate: f64,
    pub overall_dragon_rate: f64,
    pub herald_control_rate: f64,
    pub baron_control_rate: f64,
    /// Matches in which at least one dragon was taken
    pub matches_with_dragon: usize,
    pub first_dragons_taken: usize,
    pub total_dragons: usize,
    pub team_dragons: usize,
    pub total_heralds: usize,
    pub team_heralds: usize,
    pub total_barons: usize,
    pub team_barons: usize,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldEfficiency {
    pub gold_diff_at_10min: f64,
    pub gold_diff_at_15min: f64,
    pub gold_diff_at_20min: f64,
    /// Gold per minute gained between the 10 and 15 minute checkpoints
    pub gold_growth_rate: f64,
    pub samples_at_10: usize,
    pub samples_at_15: usize,
    pub samples_at_20: usize,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LolReport {
    pub team_name: String,
    pub matches_analyzed: usize,
    pub win_rate: f64,
    pub avg_game_duration_minutes: f64,
    pub jungle_proximity: JungleProximity,
    pub objective_control: ObjectiveControl,
    pub gold_efficiency: GoldEfficiency,
}

/// Aggregates League of Legends matches into scouting statistics.
///
/// The team is taken from the first match. Every method is a pure function
/// of the borrowed matches, and an empty slice yields zeroed statistics.
#[derive(Debug, Clone, Copy)]
pub struct LolAnalyzer<'a> {
    matches: &'a [LolMatch],
    team_name: &'a str,
}

impl<'a> LolAnalyzer<'a> {
    pub fn new(matches: &'a [LolMatch]) -> Self {
        let team_name = matches
            .first()
            .map_or(UNKNOWN_TEAM, |data| data.team.as_str());
        Self { matches, team_name }
    }

    pub fn team_name(&self) -> &'a str {
        self.team_name
    }

    /// Share of jungler samples spent in each lane.
    pub fn jungle_proximity(&self) -> JungleProximity {
        let mut lanes = OrderedCounter::new();
        let mut heatmap_data = HeatmapData::default();
        for position in self.matches.iter().flat_map(|data| &data.jungle_positions) {
            lanes.add(position.lane);
            heatmap_data.x.push(position.x);
            heatmap_data.y.push(position.y);
            heatmap_data.lane.push(position.lane);
        }

        let total_samples = lanes.total();
        let lane_percent = |lane| round_to(percent(lanes.get(&lane), total_samples), 1);
        let insight = match lanes.most_common() {
            Some((lane, count)) => format!(
                "Jungler focuses {:.1}% on {lane} lane",
                percent(count, total_samples)
            ),
            None => "No jungle position data available".to_string(),
        };

        JungleProximity {
            top_lane_percent: lane_percent(Lane::Top),
            mid_lane_percent: lane_percent(Lane::Mid),
            bot_lane_percent: lane_percent(Lane::Bot),
            total_samples,
            heatmap_data,
            insight,
        }
    }

    /// First-dragon rate plus overall dragon, herald and baron shares.
    pub fn objective_control(&self) -> ObjectiveControl {
        let mut matches_with_dragon = 0;
        let mut first_dragons_taken = 0;
        for data in self.matches {
            // Dragons are sorted, so the first entry is the first dragon
            if let Some(first) = data.dragons.first() {
                matches_with_dragon += 1;
                if first.team == self.team_name {
                    first_dragons_taken += 1;
                }
            }
        }

        let (team_dragons, total_dragons) = self.captures(|data| &data.dragons);
        let (team_heralds, total_heralds) = self.captures(|data| &data.heralds);
        let (team_barons, total_barons) = self.captures(|data| &data.barons);

        let first_dragon_rate = percent(first_dragons_taken, matches_with_dragon);
        let insight = if matches_with_dragon == 0 {
            "No dragon captures recorded".to_string()
        } else {
            let verdict = if first_dragon_rate > DOMINANT_FIRST_DRAGON_RATE {
                "DOMINATES"
            } else {
                "STRUGGLES WITH"
            };
            format!("{verdict} early objective control ({first_dragon_rate:.0}% first dragon rate)")
        };

        ObjectiveControl {
            first_dragon_rate: round_to(first_dragon_rate, 1),
            overall_dragon_rate: round_to(percent(team_dragons, total_dragons), 1),
            herald_control_rate: round_to(percent(team_heralds, total_heralds), 1),
            baron_control_rate: round_to(percent(team_barons, total_barons), 1),
            matches_with_dragon,
            first_dragons_taken,
            total_dragons,
            team_dragons,
            total_heralds,
            team_heralds,
            total_barons,
            team_barons,
            insight,
        }
    }

    /// Team and total captures of one objective across every match.
    fn captures(&self, objective: impl Fn(&LolMatch) -> &Vec<ObjectiveCapture>) -> (usize, usize) {
        self.matches
            .iter()
            .flat_map(objective)
            .fold((0, 0), |(team, total), capture| {
                let taken = usize::from(capture.team == self.team_name);
                (team + taken, total + 1)
            })
    }

    /// Average gold difference around 10, 15 and 20 minutes.
    ///
    /// Snapshots are bucketed by timestamp, not by index, and pooled across
    /// matches. The growth rate is a two-point difference between the 10 and
    /// 15 minute averages and is reported as 0 unless both are non-zero.
    pub fn gold_efficiency(&self) -> GoldEfficiency {
        let mut buckets: [Vec<i64>; 3] = Default::default();
        for snapshot in self.matches.iter().flat_map(|data| &data.gold_updates) {
            let checkpoint = GOLD_CHECKPOINT_MINUTES
                .iter()
                .position(|minute| snapshot.timestamp.abs_diff(minute * 60) <= GOLD_WINDOW_SECS);
            if let Some(index) = checkpoint {
                buckets[index].push(snapshot.gold_difference);
            }
        }

        let [at_10, at_15, at_20] = &buckets;
        let (avg_10, avg_15, avg_20) = (mean(at_10), mean(at_15), mean(at_20));
        let minutes_between = f64::from(GOLD_CHECKPOINT_MINUTES[1] - GOLD_CHECKPOINT_MINUTES[0]);
        let growth_rate = if avg_10 != 0.0 && avg_15 != 0.0 {
            (avg_15 - avg_10) / minutes_between
        } else {
            0.0
        };

        let insight = if at_15.is_empty() {
            "No gold data around 15 minutes".to_string()
        } else {
            let verdict = if avg_15 > 0.0 { "Strong" } else { "Weak" };
            format!(
                "{verdict} mid-game scaling ({:+}g @ 15min)",
                round_to(avg_15, 0) as i64
            )
        };

        GoldEfficiency {
            gold_diff_at_10min: round_to(avg_10, 0),
            gold_diff_at_15min: round_to(avg_15, 0),
            gold_diff_at_20min: round_to(avg_20, 0),
            gold_growth_rate: round_to(growth_rate, 0),
            samples_at_10: at_10.len(),
            samples_at_15: at_15.len(),
            samples_at_20: at_20.len(),
            insight,
        }
    }

    pub fn complete_analysis(&self) -> LolReport {
        let matches_analyzed = self.matches.len();
        let wins = self.matches.iter().filter(|data| data.won).count();
        let durations: Vec<i64> = self
            .matches
            .iter()
            .map(|data| i64::from(data.duration))
            .collect();
        debug!(
            "Analyzing {matches_analyzed} LoL matches for {}",
            self.team_name
        );

        LolReport {
            team_name: self.team_name.to_string(),
            matches_analyzed,
            win_rate: round_to(percent(wins, matches_analyzed), 1),
            avg_game_duration_minutes: round_to(mean(&durations) / 60.0, 1),
            jungle_proximity: self.jungle_proximity(),
            objective_control: self.objective_control(),
            gold_efficiency: self.gold_efficiency(),
        }
    }
}

pub fn analyze_lol_team(matches: &[LolMatch]) -> LolReport {
    LolAnalyzer::new(matches).complete_analysis()
}
