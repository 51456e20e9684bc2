//! Match execution engine

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::outcome::{Choice, EventHistogram, OutcomeLog, Seat};
use crate::payoff::PayoffMatrix;
use crate::player::{Player, PlayerRecord};
use crate::strategy::StrategyConfig;

/// Loadable description of a match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub rounds: u32,
    pub seats: [PlayerRecord; 2],
    #[serde(default)]
    pub payoffs: Option<PayoffMatrix>,
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tit-for-tat against Joss over 100 rounds with the classic matrix
    pub fn demo() -> Self {
        Self {
            rounds: 100,
            seats: [
                PlayerRecord::new("TitForTat", StrategyConfig::tit_for_tat()),
                PlayerRecord::new("Joss", StrategyConfig::joss()),
            ],
            payoffs: Some(PayoffMatrix::default()),
        }
    }
}

/// A completed match between two players
///
/// Construction plays every round; afterwards only the payoff matrix
/// can change, and that only affects score queries.
#[derive(Debug)]
pub struct Match {
    players: [Player; 2],
    /// Both players as they were before the first round
    openings: [Player; 2],
    round_budget: u32,
    payoffs: Option<PayoffMatrix>,
    log: OutcomeLog,
}

impl Match {
    /// Run a complete match
    ///
    /// # Arguments
    /// * `round_budget` - Number of rounds to play
    /// * `first` - Player in seat 0, decides first each round
    /// * `second` - Player in seat 1
    /// * `payoffs` - Matrix used for scoring, may be set later
    ///
    /// Fails with `DuplicatePlayer` if both seats share an identity.
    pub fn new(
        round_budget: u32,
        first: Player,
        second: Player,
        payoffs: Option<PayoffMatrix>,
    ) -> Result<Self, MatchError> {
        if first.id() == second.id() {
            return Err(MatchError::DuplicatePlayer { id: first.id() });
        }
        if let Some(matrix) = &payoffs {
            note_ordering(matrix);
        }

        let openings = [first.copy(), second.copy()];
        let mut game = Self {
            players: [first, second],
            openings,
            round_budget,
            payoffs,
            log: OutcomeLog::with_capacity(round_budget as usize),
        };
        game.play();

        debug!(
            "{} vs {}: {} rounds, events {:?}",
            game.players[0].name(),
            game.players[1].name(),
            game.log.round_count(),
            game.log.event_histogram().counts(),
        );
        Ok(game)
    }

    pub fn from_config(config: &MatchConfig) -> Result<Self, MatchError> {
        let first = Player::try_from(&config.seats[0])?;
        let second = Player::try_from(&config.seats[1])?;
        Self::new(config.rounds, first, second, config.payoffs)
    }

    /// Both decisions of a round see only the rounds before it.
    fn play(&mut self) {
        for round in 0..self.round_budget {
            let [first, second] = &mut self.players;
            let choice_first = first.decide(&self.log, Seat::First);
            let choice_second = second.decide(&self.log, Seat::Second);
            self.log.record_round(choice_first, choice_second);
            trace!("round {}: {:?} / {:?}", round, choice_first, choice_second);
        }
    }

    /// Replay with new copies of both players, restored to the state
    /// they entered this match with
    pub fn rematch(&self) -> Result<Self, MatchError> {
        Self::new(
            self.round_budget,
            self.openings[0].copy(),
            self.openings[1].copy(),
            self.payoffs,
        )
    }

    pub fn is_complete(&self) -> bool {
        self.log.round_count() == self.round_budget as usize
    }

    pub fn round_budget(&self) -> u32 {
        self.round_budget
    }

    pub fn round_count(&self) -> usize {
        self.log.round_count()
    }

    pub fn log(&self) -> &OutcomeLog {
        &self.log
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Result<&Player, MatchError> {
        Ok(&self.players[Seat::try_from(seat)?.index()])
    }

    pub fn event_histogram(&self) -> EventHistogram {
        self.log.event_histogram()
    }

    pub fn sequence_for_seat(&self, seat: usize) -> Result<&[Choice], MatchError> {
        self.log.sequence_for_seat(seat)
    }

    pub fn payoffs(&self) -> Option<&PayoffMatrix> {
        self.payoffs.as_ref()
    }

    pub fn set_payoffs(&mut self, payoffs: Option<PayoffMatrix>) {
        if let Some(matrix) = &payoffs {
            note_ordering(matrix);
        }
        self.payoffs = payoffs;
    }

    pub fn score_for_seat(&self, seat: usize) -> Result<f64, MatchError> {
        let seat = Seat::try_from(seat)?;
        let matrix = self.require_payoffs()?;
        Ok(matrix.score(&self.log.event_histogram(), seat))
    }

    pub fn scores(&self) -> Result<(f64, f64), MatchError> {
        let matrix = self.require_payoffs()?;
        let histogram = self.log.event_histogram();
        Ok((
            matrix.score(&histogram, Seat::First),
            matrix.score(&histogram, Seat::Second),
        ))
    }

    fn require_payoffs(&self) -> Result<&PayoffMatrix, MatchError> {
        self.payoffs.as_ref().ok_or_else(|| {
            warn!("score requested before payoffs were set");
            MatchError::PayoffsUnset
        })
    }
}

fn note_ordering(matrix: &PayoffMatrix) {
    if !matrix.follows_dilemma_ordering() {
        debug!("payoff matrix {:?} breaks c > a, b > d, d > a", matrix.as_array());
    }
}
