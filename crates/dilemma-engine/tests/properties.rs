use dilemma_engine::{Match, MatchError, OutcomeLog, PayoffMatrix, Player, Seat, StrategyConfig};
use proptest::prelude::*;

fn any_strategy() -> impl Strategy<Value = StrategyConfig> {
    prop_oneof![
        Just(StrategyConfig::AlwaysCooperate),
        Just(StrategyConfig::AlwaysCompete),
        Just(StrategyConfig::Grudger),
        (0.0..=1.0f64).prop_map(|p| StrategyConfig::RandomChoice { cooperation_probability: p }),
        (1u32..5, 1u32..5).prop_map(|(tats_needed, tits_length)| {
            StrategyConfig::TitForTatWindow { tats_needed, tits_length }
        }),
        (0.0..=1.0f64).prop_map(|p| StrategyConfig::ProbabilisticReactive { compete_probability: p }),
    ]
}

/// Matrices with c > a, b > d, d > a
fn dilemma_matrix() -> impl Strategy<Value = PayoffMatrix> {
    (0i32..5, 1i32..5, 1i32..5, 1i32..5).prop_map(|(a, gap_d, gap_b, gap_c)| {
        let a = a as f64;
        let d = a + gap_d as f64;
        let b = d + gap_b as f64;
        let c = a + gap_c as f64;
        PayoffMatrix::new(a, b, c, d)
    })
}

fn play(rounds: u32, first: StrategyConfig, second: StrategyConfig, seed: u64) -> Match {
    Match::new(
        rounds,
        Player::new("first", first.build_seeded(seed).unwrap()),
        Player::new("second", second.build_seeded(seed.wrapping_add(1)).unwrap()),
        None,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn histogram_sums_to_round_budget(
        first in any_strategy(),
        second in any_strategy(),
        rounds in 0u32..120,
        seed in any::<u64>(),
    ) {
        let game = play(rounds, first, second, seed);
        prop_assert!(game.is_complete());
        prop_assert_eq!(game.event_histogram().total(), rounds);
        prop_assert_eq!(game.round_count(), rounds as usize);
        prop_assert_eq!(game.sequence_for_seat(0).unwrap().len(), rounds as usize);
        prop_assert_eq!(game.sequence_for_seat(1).unwrap().len(), rounds as usize);
    }

    #[test]
    fn score_total_depends_only_on_histogram(
        first in any_strategy(),
        second in any_strategy(),
        matrix in dilemma_matrix(),
        rounds in 1u32..80,
        seed in any::<u64>(),
    ) {
        prop_assume!(matrix.follows_dilemma_ordering());
        let mut game = play(rounds, first, second, seed);
        game.set_payoffs(Some(matrix));
        let (s0, s1) = game.scores().unwrap();

        // replay the same rounds in reverse order through a fresh log
        let mut reversed = OutcomeLog::new();
        let rounds: Vec<_> = game.log().rounds().collect();
        for round in rounds.iter().rev() {
            reversed.record_round(round.first, round.second);
        }
        let h = reversed.event_histogram();
        prop_assert_eq!(h, game.event_histogram());
        let total = matrix.score(&h, Seat::First) + matrix.score(&h, Seat::Second);
        prop_assert!((total - (s0 + s1)).abs() < 1e-9);
    }

    #[test]
    fn scores_equal_per_round_sum(
        first in any_strategy(),
        second in any_strategy(),
        matrix in dilemma_matrix(),
        rounds in 0u32..80,
        seed in any::<u64>(),
    ) {
        let mut game = play(rounds, first, second, seed);
        game.set_payoffs(Some(matrix));

        let mut totals = [0.0f64; 2];
        for round in game.log().rounds() {
            for seat in Seat::BOTH {
                totals[seat.index()] += matrix.payoff(round.event(), seat);
            }
        }
        let (s0, s1) = game.scores().unwrap();
        prop_assert!((s0 - totals[0]).abs() < 1e-9);
        prop_assert!((s1 - totals[1]).abs() < 1e-9);
        prop_assert_eq!(game.score_for_seat(0).unwrap(), s0);
        prop_assert_eq!(game.score_for_seat(1).unwrap(), s1);
    }

    #[test]
    fn invalid_seats_are_rejected(seat in 2usize..1000) {
        let game = play(3, StrategyConfig::AlwaysCooperate, StrategyConfig::AlwaysCompete, 0);
        prop_assert_eq!(game.sequence_for_seat(seat), Err(MatchError::InvalidSeat(seat)));
        prop_assert_eq!(game.score_for_seat(seat), Err(MatchError::InvalidSeat(seat)));
    }

    #[test]
    fn grudger_never_forgives(
        opponent in any_strategy(),
        rounds in 1u32..100,
        seed in any::<u64>(),
    ) {
        let game = play(rounds, StrategyConfig::Grudger, opponent, seed);
        let grudger = game.sequence_for_seat(0).unwrap();
        let other = game.sequence_for_seat(1).unwrap();
        if let Some(first_betrayal) = other.iter().position(|c| c.is_compete()) {
            prop_assert!(grudger[..=first_betrayal].iter().all(|c| !c.is_compete()));
            prop_assert!(grudger[first_betrayal + 1..].iter().all(|c| c.is_compete()));
        } else {
            prop_assert!(grudger.iter().all(|c| !c.is_compete()));
        }
    }

    #[test]
    fn seeded_matches_are_reproducible(
        first in any_strategy(),
        second in any_strategy(),
        rounds in 0u32..60,
        seed in any::<u64>(),
    ) {
        let game = play(rounds, first, second, seed);
        let again = play(rounds, first, second, seed);
        prop_assert_eq!(game.log(), again.log());
    }
}
