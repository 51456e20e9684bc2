//! Dilemma Engine
//!
//! Core logic for repeated two-player Prisoner's Dilemma matches:
//! history-driven strategies, the round loop, and score derivation
//! from a configurable payoff matrix.
//! This crate is compiled to:
//! - Native (library and the `dilemma` binary)
//! - WASM (for frontend match replay)

mod error;
mod random;
mod outcome;
mod payoff;
mod strategy;
mod player;
mod game;
mod report;
mod tournament;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{MatchError, ReportError};
pub use random::SeededRng;
pub use outcome::{Choice, Event, EventHistogram, OutcomeLog, Round, Seat};
pub use payoff::PayoffMatrix;
pub use strategy::{
    describe_strategy, AlwaysCompete, AlwaysCooperate, Grudger, ProbabilisticReactive,
    RandomChoice, Strategy, StrategyConfig, TitForTatWindow,
};
pub use player::{Player, PlayerId, PlayerRecord, MAX_RECORDED_ID};
pub use game::{Match, MatchConfig};
pub use report::{format_score, seat_labels, MatchReport, MAX_NAME_LEN};
pub use tournament::{
    round_robin_pairings, run_round_robin, PairingResult, Standing, TournamentConfig,
    TournamentResult,
};
