use crate::ScoutingStats;
use indoc::formatdoc;
use vanguard_analysis::{LolReport, ValorantReport};
use vanguard_model::label::{Lane, Site};

const FOOTER: &str = "*Generated by Vanguard Scout | \"Moneyball for Esports\"*";

/// Render a report deterministically from the numbers alone.
pub fn render(stats: &ScoutingStats) -> String {
    match stats {
        ScoutingStats::Lol(report) => render_lol(report),
        ScoutingStats::Valorant(report) => render_valorant(report),
    }
}

pub fn render_lol(report: &LolReport) -> String {
    let jungle = &report.jungle_proximity;
    let objectives = &report.objective_control;
    let gold = &report.gold_efficiency;

    // Least visited lane, first in Top/Mid/Bot order on ties
    let (weakest_lane, weakest_percent) = Lane::ALL
        .into_iter()
        .map(|lane| (lane, jungle.lane_percent(lane)))
        .fold(None, |weakest: Option<(Lane, f64)>, (lane, percent)| match weakest {
            Some((_, lowest)) if lowest <= percent => weakest,
            _ => Some((lane, percent)),
        })
        .unwrap_or((Lane::Top, 0.0));

    let first_dragon_rate = objectives.first_dragon_rate;
    let gold_at_15 = gold.gold_diff_at_15min as i64;
    let early_control = if first_dragon_rate > 70.0 {
        "ELITE"
    } else {
        "INCONSISTENT"
    };
    let scaling = if gold_at_15 > 0 { "STRENGTH" } else { "WEAKNESS" };
    let objective_call = if first_dragon_rate < 50.0 {
        "🚨 They STRUGGLE to secure early objectives - contest every dragon spawn!"
    } else {
        "✅ Strong early objective control - must deny vision and contest aggressively."
    };
    let gold_call = if gold_at_15 < 0 {
        "🚨 They bleed gold in the mid-game - extend games and scale!"
    } else {
        "⚠️ They accelerate leads - must survive early game and prevent snowball."
    };
    let objective_flaw = if first_dragon_rate < 50.0 {
        "Early objective control is weak."
    } else {
        "They over-commit to objectives - can be baited."
    };
    let third_step = if gold_at_15 < 0 {
        "**Survive to 15 Minutes** - They lose gold leads, we scale better"
    } else {
        "**Punish Their Early Aggression** - Force skirmishes before they establish vision control"
    };

    formatdoc! {"
        ---
        ## 🎯 SCOUTING REPORT: {team_name}

        ### 📊 Key Patterns

        **Win Rate:** {win_rate:.1}% ({matches} matches analyzed)

        1. **Jungle Pathing is PREDICTABLE** - Heavy focus on certain lanes leaves others vulnerable
        2. **Early Objective Control is {early_control}** - {first_dragon_rate:.0}% first dragon rate
        3. **Mid-Game Scaling Shows {scaling}** - {gold_at_15:+} gold @ 15min

        ### 🌲 Jungle Pressure Map

        **Lane Distribution:**
        - Top Lane: {top:.1}%
        - Mid Lane: {mid:.1}%
        - Bot Lane: {bot:.1}%

        **⚠️ CRITICAL INSIGHT:** {weakest_lane} lane receives the LEAST jungle attention ({weakest_percent:.1}%). This is an exploitable weakness.

        ### 🐉 Objective Control Assessment

        **First Dragon Control:** {first_dragon_rate:.1}%
        **Overall Dragon Control:** {dragon_rate:.1}%
        **Rift Herald Control:** {herald_rate:.1}%
        **Baron Control:** {baron_rate:.1}%

        {objective_call}

        ### 💰 Economic Trends

        **Gold @ 10min:** {gold_at_10:+}
        **Gold @ 15min:** {gold_at_15:+}
        **Gold @ 20min:** {gold_at_20:+}

        {gold_call}

        ### 🚨 THE WIN CONDITION

        **Their Fatal Flaw:** {weakest_lane} lane is ABANDONED by their jungler ({weakest_percent:.1}% presence). {objective_flaw}

        **Our Counter-Strategy:**
        1. **Camp {weakest_lane} Lane** - Set up repeated ganks in the 8-15 minute window
        2. **Contest Every Drake** - Their {first_dragon_rate:.0}% first dragon rate means we can steal early momentum
        3. {third_step}

        **Timing Window:** **Minutes 8-15** - Their jungler is predictable, and their macro is weakest here.

        **Target Priority:**
        1. {weakest_lane} laner (most isolated)
        2. Contest dragon at 5:00, 10:00, 15:00 spawns
        3. Deny vision around Baron pit after 20:00

        ---
        {footer}
        ",
        team_name = report.team_name,
        win_rate = report.win_rate,
        matches = report.matches_analyzed,
        top = jungle.top_lane_percent,
        mid = jungle.mid_lane_percent,
        bot = jungle.bot_lane_percent,
        dragon_rate = objectives.overall_dragon_rate,
        herald_rate = objectives.herald_control_rate,
        baron_rate = objectives.baron_control_rate,
        gold_at_10 = gold.gold_diff_at_10min as i64,
        gold_at_20 = gold.gold_diff_at_20min as i64,
        early_control = early_control,
        first_dragon_rate = first_dragon_rate,
        scaling = scaling,
        gold_at_15 = gold_at_15,
        weakest_lane = weakest_lane,
        weakest_percent = weakest_percent,
        objective_call = objective_call,
        gold_call = gold_call,
        objective_flaw = objective_flaw,
        third_step = third_step,
        footer = FOOTER,
    }
}

pub fn render_valorant(report: &ValorantReport) -> String {
    let duels = &report.opening_duel_stats;
    let sites = &report.site_bias_stats;
    let economy = &report.economy_stats;

    let first_blood_rate = duels.first_blood_rate;
    let eco_rate = economy.eco_conversion_rate;
    let favorite = sites.favorite_site.unwrap_or(Site::A);
    let favorite_percent = sites.site(favorite).map_or(0.0, |stats| stats.attack_percent);
    let site_line = |site: Site| {
        let (percent, win_rate) = sites
            .site(site)
            .map_or((0.0, 0.0), |stats| (stats.attack_percent, stats.win_rate));
        format!("**Site {site} Attacks:** {percent:.1}% (Win Rate: {win_rate:.1}%)")
    };

    let weak_openers = first_blood_rate < 50.0;
    let soft_ecos = eco_rate < 15.0;
    let duel_quality = if first_blood_rate > 55.0 {
        "ELITE"
    } else {
        "INCONSISTENT"
    };
    let eco_quality = if eco_rate > 20.0 {
        "DANGEROUS"
    } else {
        "PREDICTABLE"
    };
    let duel_call = if weak_openers {
        "🚨 They CRUMBLE when losing the opening duel - aggressive early peaks will tilt them!"
    } else {
        "⚠️ Strong early fraggers - must trade carefully and play post-plant."
    };
    let eco_call = if soft_ecos {
        "🚨 They throw away eco rounds - sheriffs and spectres shut them down!"
    } else {
        "⚠️ Dangerous on eco - must respect their aim and positioning."
    };
    let flaw = if weak_openers {
        "They cannot win without first blood."
    } else {
        "Predictable eco-round strats."
    };
    let duel_plan = if weak_openers {
        "Take first blood and they fall apart"
    } else {
        "Trade 1-for-1 and deny their entry fragger"
    };
    let (eco_plan_title, eco_plan) = if soft_ecos {
        (
            "Punish Eco Rounds Relentlessly",
            "Sheriff headshots are free - push aggressively",
        )
    } else {
        (
            "Respect Their Aim on Ecos",
            "Play default and avoid risky peeks",
        )
    };
    let eco_exploit = if soft_ecos {
        "Push aggressively, they have no answer"
    } else {
        "Play disciplined, they CAN upset"
    };
    let full_buy_exploit = if weak_openers {
        "Deny their entry fragger and they crumble"
    } else {
        "Trade carefully and play post-plant"
    };

    formatdoc! {"
        ---
        ## 🎯 SCOUTING REPORT: {team_name}

        ### 📊 Key Patterns

        **Match Win Rate:** {match_win_rate:.1}% | **Round Win Rate:** {round_win_rate:.1}%
        **Matches Analyzed:** {matches} | **Total Rounds:** {rounds}

        1. **Opening Duels are {duel_quality}** - {first_blood_rate:.1}% first blood rate
        2. **HEAVILY PREDICTABLE Site Bias** - {favorite}-Site is attacked {favorite_percent:.0}% of the time
        3. **Eco Rounds are {eco_quality}** - {eco_rate:.1}% win rate on saves

        ### ⚔️ Opening Engagement Analysis

        **First Blood Rate:** {first_blood_rate:.1}%
        **First Blood Conversion:** {conversion:.1}%

        **Rounds Won WITH First Blood:** {won_with}
        **Rounds Won WITHOUT First Blood:** {won_without}

        {duel_call}

        ### 🗺️ Site Attack Tendencies

        {site_a}
        {site_b}
        {site_c}

        **⚠️ EXPLOITABLE BIAS:** They attack **{favorite}-Site {favorite_percent:.0}%** of the time. Stack {favorite} and force rotations.

        ### 💳 Economic Discipline

        **Eco Round Conversion:** {eco_rate:.1}%
        **Force Buy Win Rate:** {force_rate:.1}%
        **Full Buy Win Rate:** {full_rate:.1}%

        {eco_call}

        ### 🚨 THE WIN CONDITION

        **Their Fatal Flaw:** OVER-COMMITMENT to **{favorite}-Site** ({favorite_percent:.0}% of attacks). {flaw}

        **Our Counter-Strategy:**
        1. **Stack {favorite}-Site Early** - Put 3 players on {favorite} by default, they'll walk into the trap
        2. **Challenge Opening Duels Aggressively** - {duel_plan}
        3. **{eco_plan_title}** - {eco_plan}

        **Map Control Focus:**
        - **Primary:** {favorite}-Site default setup (they WILL come here)
        - **Secondary:** Mid control to fast-rotate when they finally hit other sites

        **Round Type Exploit:**
        - **Eco Rounds:** {eco_exploit}
        - **Full Buy Rounds:** {full_buy_exploit}

        ---
        {footer}
        ",
        team_name = report.team_name,
        match_win_rate = report.match_win_rate,
        round_win_rate = report.round_win_rate,
        matches = report.matches_analyzed,
        rounds = report.total_rounds_played,
        conversion = duels.first_blood_conversion,
        won_with = duels.rounds_won_with_fb,
        won_without = duels.rounds_won_without_fb,
        site_a = site_line(Site::A),
        site_b = site_line(Site::B),
        site_c = site_line(Site::C),
        force_rate = economy.force_buy_winrate,
        full_rate = economy.full_buy_winrate,
        duel_quality = duel_quality,
        first_blood_rate = first_blood_rate,
        favorite = favorite,
        favorite_percent = favorite_percent,
        eco_quality = eco_quality,
        eco_rate = eco_rate,
        duel_call = duel_call,
        eco_call = eco_call,
        flaw = flaw,
        duel_plan = duel_plan,
        eco_plan_title = eco_plan_title,
        eco_plan = eco_plan,
        eco_exploit = eco_exploit,
        full_buy_exploit = full_buy_exploit,
        footer = FOOTER,
    }
}
