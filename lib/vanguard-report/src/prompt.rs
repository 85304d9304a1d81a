use crate::ScoutingStats;
use indoc::{formatdoc, indoc};
use vanguard_model::Game;

const LOL_REQUIREMENTS: &str = indoc! {"
    2. JUNGLE ANALYSIS
       - Where does their jungler neglect? (Top/Mid/Bot)
       - Can we exploit their jungle pathing?

    3. OBJECTIVE CONTROL
       - Are they vulnerable to early dragon steals?
       - Do they give up heralds/barons easily?

    4. GOLD SCALING
       - Do they fall behind in the mid-game?
       - Can we punish their early game?

    5. **THE WIN CONDITION** (MOST IMPORTANT SECTION)
       Based on the data, provide:
       - Their BIGGEST WEAKNESS (be specific)
       - Our COUNTER-STRATEGY (actionable steps)
       - The exact TIMING WINDOW to exploit (e.g., \"Between 10-15 minutes\")
       - The KEY PLAYERS to target or lanes to pressure"};

const LOL_LAYOUT: &str = indoc! {"
    ### 🌲 Jungle Pressure Map
    [Analysis of jungle proximity]

    ### 🐉 Objective Control Assessment
    [Analysis of dragon/baron control]

    ### 💰 Economic Trends
    [Analysis of gold efficiency]

    ### 🚨 THE WIN CONDITION
    **Their Fatal Flaw:** [Specific weakness]
    **Our Counter-Strategy:** [Detailed action plan]
    **Timing Window:** [Exact time frame]
    **Target Priority:** [Who/what to focus]"};

const VALORANT_REQUIREMENTS: &str = indoc! {"
    2. OPENING DUELS
       - Are they weak in early fights?
       - Do they lose when they DON'T get first blood?

    3. SITE BIAS
       - Which site do they over-commit to?
       - Can we bait them into their comfort zone and counter?

    4. ECONOMY DISCIPLINE
       - Are they predictable on eco rounds?
       - Do they force-buy recklessly?

    5. **THE WIN CONDITION** (MOST IMPORTANT SECTION)
       Based on the data, provide:
       - Their BIGGEST WEAKNESS (be specific)
       - Our COUNTER-STRATEGY (actionable steps)
       - The MAP AREAS to exploit (e.g., \"A-Main control\")
       - The ROUND TYPES where they're vulnerable (Eco/Force/Full)"};

const VALORANT_LAYOUT: &str = indoc! {"
    ### ⚔️ Opening Engagement Analysis
    [Analysis of first blood stats]

    ### 🗺️ Site Attack Tendencies
    [Analysis of site bias]

    ### 💳 Economic Discipline
    [Analysis of eco/force buy patterns]

    ### 🚨 THE WIN CONDITION
    **Their Fatal Flaw:** [Specific weakness]
    **Our Counter-Strategy:** [Detailed action plan]
    **Map Control Focus:** [Which areas to dominate]
    **Round Type Exploit:** [When they're weakest]"};

/// Build the coaching prompt sent to a hosted model.
pub fn build_prompt(stats: &ScoutingStats) -> String {
    // Report structs only hold numbers, strings and label enums
    let stats_json = serde_json::to_string_pretty(stats).unwrap_or_default();

    let (game_name, requirements, layout) = match stats.game() {
        Game::Lol => ("League of Legends", LOL_REQUIREMENTS, LOL_LAYOUT),
        Game::Valorant => ("VALORANT", VALORANT_REQUIREMENTS, VALORANT_LAYOUT),
    };

    formatdoc! {"
        You are a RUTHLESS {game_name} Esports Coach analyzing enemy team data.

        Your job is to find EXPLOITABLE WEAKNESSES and craft a precise win condition.

        TEAM STATISTICS:
        {stats_json}

        ANALYSIS REQUIREMENTS:

        1. PATTERN RECOGNITION
           - Identify the 3 most CRITICAL patterns in their playstyle
           - Highlight both strengths AND weaknesses (focus on weaknesses)

        {requirements}

        FORMAT YOUR RESPONSE AS:
        ---
        ## 🎯 SCOUTING REPORT: {team_name}

        ### 📊 Key Patterns
        [Your analysis here]

        {layout}
        ---

        Be DIRECT. Be RUTHLESS. Be ACTIONABLE.",
        team_name = stats.team_name(),
        game_name = game_name,
        stats_json = stats_json,
        requirements = requirements,
        layout = layout,
    }
}
