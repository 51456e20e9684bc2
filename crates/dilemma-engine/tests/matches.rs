use dilemma_engine::*;
use dilemma_engine::Choice::{Compete, Cooperate};

fn player(name: &str, config: StrategyConfig) -> Player {
    Player::new(name, config.build_seeded(2024).unwrap())
}

fn play(rounds: u32, first: StrategyConfig, second: StrategyConfig) -> Match {
    Match::new(
        rounds,
        player("first", first),
        player("second", second),
        Some(PayoffMatrix::default()),
    )
    .unwrap()
}

#[test]
fn cooperator_against_competitor_fills_one_bucket() {
    for n in [1, 7, 100] {
        let game = play(n, StrategyConfig::AlwaysCooperate, StrategyConfig::AlwaysCompete);
        assert_eq!(game.event_histogram().counts(), [0, n, 0, 0]);
    }
}

#[test]
fn grudger_cooperates_once_then_competes() {
    let game = play(12, StrategyConfig::Grudger, StrategyConfig::AlwaysCompete);
    let sequence = game.sequence_for_seat(0).unwrap();
    assert_eq!(sequence[0], Cooperate);
    assert!(sequence[1..].iter().all(|c| *c == Compete));
}

#[test]
fn grudger_single_round() {
    let game = play(1, StrategyConfig::Grudger, StrategyConfig::AlwaysCompete);
    assert_eq!(game.sequence_for_seat(0).unwrap(), &[Cooperate]);
}

#[test]
fn tit_for_tat_lags_one_round() {
    let game = play(10, StrategyConfig::AlwaysCompete, StrategyConfig::tit_for_tat());
    let tft = game.sequence_for_seat(1).unwrap();
    assert_eq!(tft[0], Cooperate);
    assert!(tft[1..].iter().all(|c| *c == Compete));
}

#[test]
fn tit_for_tat_mirrors_alternating_opponent() {
    // Joss with no noise is a plain mirror: starting from mutual cooperation
    // against tit-for-tat it never competes.
    let mirror = StrategyConfig::ProbabilisticReactive { compete_probability: 0.0 };
    let game = play(50, mirror, StrategyConfig::tit_for_tat());
    assert_eq!(game.event_histogram().counts(), [50, 0, 0, 0]);
}

#[test]
fn random_choice_boundaries_are_exact() {
    let always = StrategyConfig::RandomChoice { cooperation_probability: 1.0 };
    let never = StrategyConfig::RandomChoice { cooperation_probability: 0.0 };
    let game = play(500, always, never);
    assert!(game.sequence_for_seat(0).unwrap().iter().all(|c| *c == Cooperate));
    assert!(game.sequence_for_seat(1).unwrap().iter().all(|c| *c == Compete));
}

#[test]
fn scores_match_per_round_recomputation() {
    let matrix = PayoffMatrix::new(1.0, 3.0, 4.0, 2.0);
    let mut game = play(200, StrategyConfig::joss(), StrategyConfig::random_choice());
    game.set_payoffs(Some(matrix));

    let first = game.sequence_for_seat(0).unwrap();
    let second = game.sequence_for_seat(1).unwrap();
    let mut totals = [0.0, 0.0];
    for (&a, &b) in first.iter().zip(second) {
        let event = Event::classify(a, b);
        totals[0] += matrix.payoff(event, Seat::First);
        totals[1] += matrix.payoff(event, Seat::Second);
    }

    assert_eq!(game.scores().unwrap(), (totals[0], totals[1]));
}

#[test]
fn duplicate_identity_produces_no_match() {
    let record = PlayerRecord {
        id: Some(PlayerId::adopt(4_242).unwrap()),
        ..PlayerRecord::new("Twin", StrategyConfig::Grudger)
    };
    let config = MatchConfig { rounds: 10, seats: [record.clone(), record], payoffs: None };
    match Match::from_config(&config) {
        Err(MatchError::DuplicatePlayer { id }) => assert_eq!(id.get(), 4_242),
        other => panic!("expected DuplicatePlayer, got {:?}", other),
    }
}

#[test]
fn invalid_window_parameters_fail_construction() {
    let config = StrategyConfig::TitForTatWindow { tats_needed: 3, tits_length: 0 };
    assert!(matches!(
        Player::from_config("TFT", config),
        Err(MatchError::InvalidConfig { parameter: "tits_length", .. })
    ));
}

#[test]
fn scoring_without_payoffs_recovers_after_set() {
    let mut game = Match::new(
        5,
        player("a", StrategyConfig::AlwaysCompete),
        player("b", StrategyConfig::AlwaysCompete),
        None,
    )
    .unwrap();
    assert_eq!(game.score_for_seat(1), Err(MatchError::PayoffsUnset));
    game.set_payoffs(Some(PayoffMatrix::default()));
    assert_eq!(game.score_for_seat(1), Ok(5.0));
}

#[test]
fn match_config_loads_from_json() {
    let json = r#"{
        "rounds": 20,
        "seats": [
            {"name": "Grudger", "strategy": {"kind": "Grudger"}},
            {"name": "Noise", "strategy": {"kind": "RandomChoice", "cooperation_probability": 0.0}}
        ],
        "payoffs": {"both_cooperate": 3, "cooperate_alone": 0, "compete_alone": 5, "both_compete": 1}
    }"#;
    let config = MatchConfig::from_json(json).unwrap();
    let game = Match::from_config(&config).unwrap();
    assert_eq!(game.event_histogram().counts(), [0, 1, 0, 19]);
    assert_eq!(game.scores().unwrap(), (19.0, 24.0));

    let report = MatchReport::from_match(&game).unwrap();
    assert_eq!(report.labels, ["Grudger".to_string(), "Noise".to_string()]);
    assert!(report.to_string().contains("Scores:"));
}

#[test]
fn out_of_range_recorded_id_is_rejected() {
    let json = r#"{
        "rounds": 5,
        "seats": [
            {"id": 18446744073709551615, "name": "Max", "strategy": {"kind": "Grudger"}},
            {"name": "Fresh", "strategy": {"kind": "AlwaysCooperate"}}
        ]
    }"#;
    let config = MatchConfig::from_json(json).unwrap();
    assert!(matches!(
        Match::from_config(&config),
        Err(MatchError::InvalidPlayerId(u64::MAX))
    ));

    // fresh identities keep working afterwards
    let a = Player::from_config("a", StrategyConfig::Grudger).unwrap();
    let b = Player::from_config("b", StrategyConfig::Grudger).unwrap();
    assert!(Match::new(3, a, b, None).is_ok());
}

#[test]
fn rematch_replays_a_loaded_match() {
    let config = MatchConfig {
        rounds: 30,
        seats: [
            PlayerRecord::new("Grudger", StrategyConfig::Grudger),
            PlayerRecord::new("Noise", StrategyConfig::random_choice()).with_seed(9),
        ],
        payoffs: Some(PayoffMatrix::default()),
    };
    let game = Match::from_config(&config).unwrap();
    let again = game.rematch().unwrap();
    assert_eq!(again.log(), game.log());
    assert_eq!(again.scores().unwrap(), game.scores().unwrap());
    assert_eq!(again.players()[1].record().seed, Some(9));
}
