use chrono::NaiveDate;
use vanguard_model::label::{BuyTier, Lane, Site};
use vanguard_model::lol::{JunglePosition, LolMatch, ObjectiveCapture};
use vanguard_model::valorant::{RoundRecord, ValorantMap, ValorantMatch};
use vanguard_model::{Game, MapPoint, SchemaError, OPPONENT_LABEL};

fn lol_match() -> LolMatch {
    LolMatch {
        match_id: "LOL_1".into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        team: "Cloud9".into(),
        opponent: "Team_1".into(),
        won: true,
        duration: 1800,
        kills: vec![],
        dragons: vec![ObjectiveCapture {
            timestamp: 360,
            team: "Cloud9".into(),
            dragon_type: None,
            x: 9800,
            y: 4200,
        }],
        heralds: vec![],
        barons: vec![],
        gold_updates: vec![],
        jungle_positions: vec![JunglePosition {
            timestamp: 100,
            x: 2000,
            y: 12000,
            lane: Lane::Top,
        }],
    }
}

fn round(round_number: u8, winner: &str) -> RoundRecord {
    RoundRecord {
        round_number,
        winner: winner.into(),
        team_loadout_value: 800,
        enemy_loadout_value: 4000,
        is_team_eco: true,
        is_enemy_eco: false,
        spike_site: Some(Site::B),
        spike_coords: Some(MapPoint::new(60, 30)),
        first_blood_team: OPPONENT_LABEL.into(),
        first_blood_location: MapPoint::new(50, 50),
        round_duration: 75,
    }
}

fn valorant_match() -> ValorantMatch {
    ValorantMatch {
        match_id: "VAL_1".into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        team: "Sentinels".into(),
        opponent: "Team_1".into(),
        team_score: 1,
        enemy_score: 1,
        won: false,
        map: ValorantMap::Bind,
        rounds: vec![round(1, "Sentinels"), round(2, OPPONENT_LABEL)],
    }
}

#[test]
fn test_valid_records_pass() {
    assert_eq!(lol_match().validate(), Ok(()));
    assert_eq!(valorant_match().validate(), Ok(()));
}

#[test]
fn test_timestamp_past_duration_is_rejected() {
    let mut data = lol_match();
    data.dragons[0].timestamp = 1801;
    assert_eq!(
        data.validate(),
        Err(SchemaError::TimestampOutOfRange {
            field: "dragon",
            timestamp: 1801,
            duration: 1800,
        })
    );
}

#[test]
fn test_third_team_label_is_rejected() {
    let mut data = lol_match();
    data.dragons[0].team = "Team Liquid".into();
    assert!(matches!(
        data.validate(),
        Err(SchemaError::ForeignTeam { field: "dragon.team", .. })
    ));

    let mut data = valorant_match();
    data.rounds[1].first_blood_team = "Team Liquid".into();
    assert!(matches!(
        data.validate(),
        Err(SchemaError::ForeignTeam { .. })
    ));
}

#[test]
fn test_round_numbers_must_increase() {
    let mut data = valorant_match();
    data.rounds[1].round_number = 1;
    assert_eq!(
        data.validate(),
        Err(SchemaError::RoundOutOfOrder {
            previous: 1,
            found: 1
        })
    );
}

#[test]
fn test_round_after_255_is_out_of_order() {
    let mut data = valorant_match();
    data.rounds = (1..=u8::MAX).map(|n| round(n, "Sentinels")).collect();
    data.rounds.push(round(1, OPPONENT_LABEL));
    assert_eq!(
        data.validate(),
        Err(SchemaError::RoundOutOfOrder {
            previous: u8::MAX,
            found: 1
        })
    );
}

#[test]
fn test_eco_flag_and_spike_consistency() {
    let mut data = valorant_match();
    data.rounds[0].is_team_eco = false;
    assert_eq!(data.validate(), Err(SchemaError::EcoFlagMismatch(1)));

    let mut data = valorant_match();
    data.rounds[1].spike_coords = None;
    assert_eq!(data.validate(), Err(SchemaError::SpikeMismatch(2)));
}

#[test]
fn test_buy_tier_boundaries() {
    assert_eq!(BuyTier::from_loadout(0), BuyTier::Eco);
    assert_eq!(BuyTier::from_loadout(1999), BuyTier::Eco);
    assert_eq!(BuyTier::from_loadout(2000), BuyTier::Force);
    assert_eq!(BuyTier::from_loadout(3499), BuyTier::Force);
    assert_eq!(BuyTier::from_loadout(3500), BuyTier::FullBuy);
}

#[test]
fn test_label_parsing() {
    assert_eq!("middle".parse::<Lane>(), Ok(Lane::Mid));
    assert_eq!("BOTTOM".parse::<Lane>(), Ok(Lane::Bot));
    assert!("jungle".parse::<Lane>().is_err());
    assert_eq!("c".parse::<Site>(), Ok(Site::C));
    assert_eq!("Valorant".parse::<Game>(), Ok(Game::Valorant));
}

#[test]
fn test_unplanted_round_deserializes_without_site() {
    let json = r#"{
        "round_number": 4,
        "winner": "Enemy Team",
        "team_loadout_value": 2500,
        "enemy_loadout_value": 2500,
        "is_team_eco": false,
        "is_enemy_eco": false,
        "first_blood_team": "Enemy Team",
        "first_blood_location": { "x": 12, "y": 80 },
        "round_duration": 40
    }"#;
    let round: RoundRecord = serde_json::from_str(json).unwrap();
    assert!(!round.spike_planted());
    assert_eq!(round.team_buy_tier(), BuyTier::Force);
}
