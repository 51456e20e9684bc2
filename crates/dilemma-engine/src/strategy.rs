//! Strategy definitions and execution
//!
//! Every strategy decides from the match history and its own seat; any
//! state it keeps is private and only changes through its own decisions.

use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::outcome::{Choice, OutcomeLog, Seat};
use crate::random::SeededRng;

/// Decision capability shared by all strategy variants
pub trait Strategy: core::fmt::Debug + Send {
    /// Choose the next move given everything recorded so far.
    fn decide(&mut self, history: &OutcomeLog, seat: Seat) -> Choice;

    /// Configuration this strategy was built from
    fn config(&self) -> StrategyConfig;

    /// Deep copy with independent mutable state
    fn box_clone(&self) -> Box<dyn Strategy>;

    /// Move to an independent random stream. No-op for deterministic variants.
    fn reseed(&mut self, _stream: u32) {}

    fn name(&self) -> &'static str {
        self.config().name()
    }
}

impl Clone for Box<dyn Strategy> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Serializable description of a strategy and its parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum StrategyConfig {
    /// Always cooperate.
    AlwaysCooperate,
    /// Always compete.
    AlwaysCompete,
    /// Cooperate with a fixed probability each round.
    RandomChoice { cooperation_probability: f64 },
    /// Compete after a run of `tats_needed` opponent competes in the recent window.
    TitForTatWindow { tats_needed: u32, tits_length: u32 },
    /// Cooperate until the opponent competes once, then compete forever.
    Grudger,
    /// Mirror the opponent, but compete at random with a fixed probability.
    ProbabilisticReactive { compete_probability: f64 },
}

impl StrategyConfig {
    pub fn random_choice() -> Self {
        StrategyConfig::RandomChoice { cooperation_probability: 0.5 }
    }

    pub fn tit_for_tat() -> Self {
        StrategyConfig::TitForTatWindow { tats_needed: 1, tits_length: 1 }
    }

    pub fn joss() -> Self {
        StrategyConfig::ProbabilisticReactive { compete_probability: 0.2 }
    }

    /// One of each variant with default parameters
    pub fn all_defaults() -> [StrategyConfig; 6] {
        [
            StrategyConfig::AlwaysCooperate,
            StrategyConfig::AlwaysCompete,
            StrategyConfig::random_choice(),
            StrategyConfig::tit_for_tat(),
            StrategyConfig::Grudger,
            StrategyConfig::joss(),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::AlwaysCooperate => "AlwaysCooperate",
            StrategyConfig::AlwaysCompete => "AlwaysCompete",
            StrategyConfig::RandomChoice { .. } => "RandomChoice",
            StrategyConfig::TitForTatWindow { .. } => "TitForTatWindow",
            StrategyConfig::Grudger => "Grudger",
            StrategyConfig::ProbabilisticReactive { .. } => "ProbabilisticReactive",
        }
    }

    pub fn includes_randomness(&self) -> bool {
        matches!(
            self,
            StrategyConfig::RandomChoice { .. } | StrategyConfig::ProbabilisticReactive { .. }
        )
    }

    /// Whether decisions read the match history. The reactive variant
    /// mirrors the opponent, so it counts.
    pub fn depends_on_past(&self) -> bool {
        matches!(
            self,
            StrategyConfig::TitForTatWindow { .. }
                | StrategyConfig::Grudger
                | StrategyConfig::ProbabilisticReactive { .. }
        )
    }

    /// Build a strategy, seeding random variants from process entropy
    pub fn build(&self) -> Result<Box<dyn Strategy>, MatchError> {
        self.build_with_rng(SeededRng::from_entropy())
    }

    /// Build a strategy whose random draws are reproducible
    pub fn build_seeded(&self, seed: u64) -> Result<Box<dyn Strategy>, MatchError> {
        self.build_with_rng(SeededRng::from_u64(seed))
    }

    fn build_with_rng(&self, rng: SeededRng) -> Result<Box<dyn Strategy>, MatchError> {
        Ok(match *self {
            StrategyConfig::AlwaysCooperate => Box::new(AlwaysCooperate),
            StrategyConfig::AlwaysCompete => Box::new(AlwaysCompete),
            StrategyConfig::RandomChoice { cooperation_probability } => {
                Box::new(RandomChoice::with_rng(cooperation_probability, rng)?)
            }
            StrategyConfig::TitForTatWindow { tats_needed, tits_length } => {
                Box::new(TitForTatWindow::new(tats_needed, tits_length)?)
            }
            StrategyConfig::Grudger => Box::new(Grudger::new()),
            StrategyConfig::ProbabilisticReactive { compete_probability } => {
                Box::new(ProbabilisticReactive::with_rng(compete_probability, rng)?)
            }
        })
    }
}

fn check_probability(parameter: &'static str, value: f64) -> Result<f64, MatchError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MatchError::InvalidConfig { parameter, value })
    }
}

/// Always cooperate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysCooperate;

impl Strategy for AlwaysCooperate {
    fn decide(&mut self, _history: &OutcomeLog, _seat: Seat) -> Choice {
        Choice::Cooperate
    }

    fn config(&self) -> StrategyConfig {
        StrategyConfig::AlwaysCooperate
    }

    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Always compete
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysCompete;

impl Strategy for AlwaysCompete {
    fn decide(&mut self, _history: &OutcomeLog, _seat: Seat) -> Choice {
        Choice::Compete
    }

    fn config(&self) -> StrategyConfig {
        StrategyConfig::AlwaysCompete
    }

    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Random: cooperate when a uniform draw falls below the configured probability
#[derive(Clone, Debug, PartialEq)]
pub struct RandomChoice {
    cooperation_probability: f64,
    rng: SeededRng,
}

impl RandomChoice {
    pub fn new(cooperation_probability: f64) -> Result<Self, MatchError> {
        Self::with_rng(cooperation_probability, SeededRng::from_entropy())
    }

    pub fn with_rng(cooperation_probability: f64, rng: SeededRng) -> Result<Self, MatchError> {
        let cooperation_probability =
            check_probability("cooperation_probability", cooperation_probability)?;
        Ok(Self { cooperation_probability, rng })
    }

    pub fn cooperation_probability(&self) -> f64 {
        self.cooperation_probability
    }
}

impl Strategy for RandomChoice {
    fn decide(&mut self, _history: &OutcomeLog, _seat: Seat) -> Choice {
        if self.rng.next_unit() < self.cooperation_probability {
            Choice::Cooperate
        } else {
            Choice::Compete
        }
    }

    fn config(&self) -> StrategyConfig {
        StrategyConfig::RandomChoice { cooperation_probability: self.cooperation_probability }
    }

    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }

    fn reseed(&mut self, stream: u32) {
        self.rng = self.rng.for_stream(stream);
    }
}

/// Tit-for-tat over a window: after seeing `tats_needed` consecutive opponent
/// competes, compete for roughly `tits_length` rounds.
///
/// The scan covers the opponent's last `tats_needed + tits_length - 1` choices
/// and competes as soon as a run of `tats_needed` competes is found inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TitForTatWindow {
    tats_needed: u32,
    tits_length: u32,
}

impl TitForTatWindow {
    pub fn new(tats_needed: u32, tits_length: u32) -> Result<Self, MatchError> {
        if tats_needed == 0 {
            return Err(MatchError::InvalidConfig { parameter: "tats_needed", value: 0.0 });
        }
        if tits_length == 0 {
            return Err(MatchError::InvalidConfig { parameter: "tits_length", value: 0.0 });
        }
        Ok(Self { tats_needed, tits_length })
    }

    pub fn tats_needed(&self) -> u32 {
        self.tats_needed
    }

    pub fn tits_length(&self) -> u32 {
        self.tits_length
    }

    fn window(&self) -> usize {
        (self.tats_needed as usize).saturating_add(self.tits_length as usize) - 1
    }
}

impl Strategy for TitForTatWindow {
    fn decide(&mut self, history: &OutcomeLog, seat: Seat) -> Choice {
        let opponent = history.sequence(seat.opponent());
        let start = opponent.len().saturating_sub(self.window());

        let mut run = 0u32;
        for choice in &opponent[start..] {
            if choice.is_compete() {
                run += 1;
                if run == self.tats_needed {
                    return Choice::Compete;
                }
            } else {
                run = 0;
            }
        }
        Choice::Cooperate
    }

    fn config(&self) -> StrategyConfig {
        StrategyConfig::TitForTatWindow {
            tats_needed: self.tats_needed,
            tits_length: self.tits_length,
        }
    }

    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Grudger: cooperate until the opponent competes once, then always compete
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grudger {
    triggered: bool,
}

impl Grudger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

impl Strategy for Grudger {
    fn decide(&mut self, history: &OutcomeLog, seat: Seat) -> Choice {
        if self.triggered {
            return Choice::Compete;
        }
        match history.last_choice(seat.opponent()) {
            None | Some(Choice::Cooperate) => Choice::Cooperate,
            Some(Choice::Compete) => {
                self.triggered = true;
                Choice::Compete
            }
        }
    }

    fn config(&self) -> StrategyConfig {
        StrategyConfig::Grudger
    }

    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}

/// Joss-style tit-for-tat: compete at random with a fixed probability,
/// otherwise copy the opponent's last choice (cooperate on the first round)
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilisticReactive {
    compete_probability: f64,
    rng: SeededRng,
}

impl ProbabilisticReactive {
    pub fn new(compete_probability: f64) -> Result<Self, MatchError> {
        Self::with_rng(compete_probability, SeededRng::from_entropy())
    }

    pub fn with_rng(compete_probability: f64, rng: SeededRng) -> Result<Self, MatchError> {
        let compete_probability = check_probability("compete_probability", compete_probability)?;
        Ok(Self { compete_probability, rng })
    }

    pub fn compete_probability(&self) -> f64 {
        self.compete_probability
    }
}

impl Strategy for ProbabilisticReactive {
    fn decide(&mut self, history: &OutcomeLog, seat: Seat) -> Choice {
        if self.rng.next_unit() < self.compete_probability {
            return Choice::Compete;
        }
        history
            .last_choice(seat.opponent())
            .unwrap_or(Choice::Cooperate)
    }

    fn config(&self) -> StrategyConfig {
        StrategyConfig::ProbabilisticReactive { compete_probability: self.compete_probability }
    }

    fn box_clone(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }

    fn reseed(&mut self, stream: u32) {
        self.rng = self.rng.for_stream(stream);
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(config: &StrategyConfig) -> String {
    match *config {
        StrategyConfig::AlwaysCooperate => "Never competes. Always cooperates.".to_string(),
        StrategyConfig::AlwaysCompete => "Never cooperates. Always competes.".to_string(),
        StrategyConfig::RandomChoice { cooperation_probability } => format!(
            "Cooperates at random, {}% of the time.",
            cooperation_probability * 100.0
        ),
        StrategyConfig::TitForTatWindow { tats_needed: 1, tits_length: 1 } => {
            "Copies opponent's last move. Starts by cooperating.".to_string()
        }
        StrategyConfig::TitForTatWindow { tats_needed, tits_length } => format!(
            "Competes for {} round(s) after {} consecutive competitions.",
            tits_length, tats_needed
        ),
        StrategyConfig::Grudger => "Cooperates until betrayed once, then always competes.".to_string(),
        StrategyConfig::ProbabilisticReactive { compete_probability } => format!(
            "Copies opponent's last move, but competes {}% of the time regardless.",
            compete_probability * 100.0
        ),
    }
}
