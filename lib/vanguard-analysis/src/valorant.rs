use crate::counter::OrderedCounter;
use crate::rate::{percent, round_to};
use serde::Serialize;
use tracing::debug;
use vanguard_model::label::{BuyTier, Site};
use vanguard_model::valorant::{RoundRecord, ValorantMatch};
use vanguard_model::UNKNOWN_TEAM;

/// First-blood rate above which a team counts as elite in opening duels.
const ELITE_FIRST_BLOOD_RATE: f64 = 55.0;
/// Eco win rate above which a team is dangerous on saves.
const DANGEROUS_ECO_RATE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningDuelStats {
    pub first_blood_rate: f64,
    /// Rounds won out of rounds where the team drew first blood
    pub first_blood_conversion: f64,
    pub rounds_with_first_blood: usize,
    pub rounds_won_with_fb: usize,
    pub rounds_won_without_fb: usize,
    pub total_rounds: usize,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStats {
    pub site: Site,
    pub attacks: usize,
    pub wins: usize,
    /// Share of all plants that went to this site
    pub attack_percent: f64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteBiasStats {
    /// One entry per site, in A, B, C order
    pub sites: Vec<SiteStats>,
    pub total_spike_plants: usize,
    /// Most attacked site; ties go to the site planted first
    pub favorite_site: Option<Site>,
    pub favorite_site_attacks: usize,
    /// Attacks per site in the order sites were first planted
    pub site_attack_distribution: Vec<(Site, usize)>,
    pub insight: String,
}

impl SiteBiasStats {
    pub fn site(&self, site: Site) -> Option<&SiteStats> {
        self.sites.iter().find(|stats| stats.site == site)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomyStats {
    pub eco_conversion_rate: f64,
    pub eco_rounds_played: usize,
    pub eco_rounds_won: usize,
    pub force_buy_winrate: f64,
    pub force_rounds_played: usize,
    pub force_rounds_won: usize,
    pub full_buy_winrate: f64,
    pub full_buy_rounds_played: usize,
    pub full_buy_rounds_won: usize,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValorantReport {
    pub team_name: String,
    pub matches_analyzed: usize,
    pub match_win_rate: f64,
    pub round_win_rate: f64,
    pub total_rounds_played: usize,
    pub opening_duel_stats: OpeningDuelStats,
    pub site_bias_stats: SiteBiasStats,
    pub economy_stats: EconomyStats,
}

/// Aggregates VALORANT matches into scouting statistics, round by round.
#[derive(Debug, Clone, Copy)]
pub struct ValorantAnalyzer<'a> {
    matches: &'a [ValorantMatch],
    team_name: &'a str,
}

impl<'a> ValorantAnalyzer<'a> {
    pub fn new(matches: &'a [ValorantMatch]) -> Self {
        let team_name = matches
            .first()
            .map_or(UNKNOWN_TEAM, |data| data.team.as_str());
        Self { matches, team_name }
    }

    pub fn team_name(&self) -> &'a str {
        self.team_name
    }

    fn rounds(&self) -> impl Iterator<Item = &'a RoundRecord> {
        let matches = self.matches;
        matches.iter().flat_map(|data| &data.rounds)
    }

    fn won(&self, round: &RoundRecord) -> bool {
        round.winner == self.team_name
    }

    pub fn opening_duels(&self) -> OpeningDuelStats {
        let mut total_rounds = 0;
        let mut rounds_with_first_blood = 0;
        let mut rounds_won_with_fb = 0;
        let mut rounds_won_without_fb = 0;

        for round in self.rounds() {
            total_rounds += 1;
            let won = self.won(round);
            if round.first_blood_team == self.team_name {
                rounds_with_first_blood += 1;
                rounds_won_with_fb += usize::from(won);
            } else {
                rounds_won_without_fb += usize::from(won);
            }
        }

        let first_blood_rate = percent(rounds_with_first_blood, total_rounds);
        let first_blood_conversion = percent(rounds_won_with_fb, rounds_with_first_blood);
        let insight = if total_rounds == 0 {
            "No rounds recorded".to_string()
        } else {
            let verdict = if first_blood_rate > ELITE_FIRST_BLOOD_RATE {
                "ELITE"
            } else {
                "AVERAGE"
            };
            format!(
                "{verdict} opening duelist ({first_blood_rate:.1}% FB rate, {first_blood_conversion:.1}% conversion)"
            )
        };

        OpeningDuelStats {
            first_blood_rate: round_to(first_blood_rate, 1),
            first_blood_conversion: round_to(first_blood_conversion, 1),
            rounds_with_first_blood,
            rounds_won_with_fb,
            rounds_won_without_fb,
            total_rounds,
            insight,
        }
    }

    /// Where the spike goes down. Rounds without a plant are left out.
    pub fn site_bias(&self) -> SiteBiasStats {
        let mut attacks = OrderedCounter::new();
        let mut wins = OrderedCounter::new();
        for round in self.rounds() {
            let Some(site) = round.spike_site else {
                continue;
            };
            attacks.add(site);
            if self.won(round) {
                wins.add(site);
            }
        }

        let total_spike_plants = attacks.total();
        let sites: Vec<SiteStats> = Site::ALL
            .into_iter()
            .map(|site| {
                let site_attacks = attacks.get(&site);
                let site_wins = wins.get(&site);
                SiteStats {
                    site,
                    attacks: site_attacks,
                    wins: site_wins,
                    attack_percent: round_to(percent(site_attacks, total_spike_plants), 1),
                    win_rate: round_to(percent(site_wins, site_attacks), 1),
                }
            })
            .collect();

        let favorite = attacks.most_common().map(|(site, count)| (*site, count));
        let insight = match favorite {
            Some((site, count)) => format!(
                "HEAVILY favors {site}-Site ({:.0}% of attacks)",
                percent(count, total_spike_plants)
            ),
            None => "No spike plants recorded".to_string(),
        };

        SiteBiasStats {
            sites,
            total_spike_plants,
            favorite_site: favorite.map(|(site, _)| site),
            favorite_site_attacks: favorite.map_or(0, |(_, count)| count),
            site_attack_distribution: attacks.iter().map(|(site, count)| (*site, count)).collect(),
            insight,
        }
    }

    /// Win rates by the team's own spend tier.
    pub fn economy(&self) -> EconomyStats {
        let mut played = OrderedCounter::new();
        let mut won = OrderedCounter::new();
        for round in self.rounds() {
            let tier = round.team_buy_tier();
            played.add(tier);
            if self.won(round) {
                won.add(tier);
            }
        }

        let raw_win_rate = |tier| percent(won.get(&tier), played.get(&tier));
        let win_rate = |tier| round_to(raw_win_rate(tier), 1);
        let eco_conversion_rate = raw_win_rate(BuyTier::Eco);
        let eco_rounds_played = played.get(&BuyTier::Eco);
        let insight = if eco_rounds_played == 0 {
            "No eco rounds recorded".to_string()
        } else {
            let verdict = if eco_conversion_rate > DANGEROUS_ECO_RATE {
                "DANGEROUS"
            } else {
                "PREDICTABLE"
            };
            format!("{verdict} on eco rounds ({eco_conversion_rate:.1}% win rate)")
        };

        EconomyStats {
            eco_conversion_rate: round_to(eco_conversion_rate, 1),
            eco_rounds_played,
            eco_rounds_won: won.get(&BuyTier::Eco),
            force_buy_winrate: win_rate(BuyTier::Force),
            force_rounds_played: played.get(&BuyTier::Force),
            force_rounds_won: won.get(&BuyTier::Force),
            full_buy_winrate: win_rate(BuyTier::FullBuy),
            full_buy_rounds_played: played.get(&BuyTier::FullBuy),
            full_buy_rounds_won: won.get(&BuyTier::FullBuy),
            insight,
        }
    }

    pub fn complete_analysis(&self) -> ValorantReport {
        let matches_analyzed = self.matches.len();
        let wins = self.matches.iter().filter(|data| data.won).count();
        let total_rounds_played = self.rounds().count();
        let rounds_won = self.rounds().filter(|round| self.won(round)).count();
        debug!(
            "Analyzing {matches_analyzed} VALORANT matches ({total_rounds_played} rounds) for {}",
            self.team_name
        );

        ValorantReport {
            team_name: self.team_name.to_string(),
            matches_analyzed,
            match_win_rate: round_to(percent(wins, matches_analyzed), 1),
            round_win_rate: round_to(percent(rounds_won, total_rounds_played), 1),
            total_rounds_played,
            opening_duel_stats: self.opening_duels(),
            site_bias_stats: self.site_bias(),
            economy_stats: self.economy(),
        }
    }
}

pub fn analyze_valorant_team(matches: &[ValorantMatch]) -> ValorantReport {
    ValorantAnalyzer::new(matches).complete_analysis()
}
