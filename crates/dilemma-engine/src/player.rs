//! Players: a named strategy instance with an identity

use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::outcome::{Choice, OutcomeLog, Seat};
use crate::strategy::{Strategy, StrategyConfig};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Recorded ids above this are refused, so the fresh range can never run out.
pub const MAX_RECORDED_ID: u64 = i64::MAX as u64;

/// Identity of a strategy instance. Two seats of a match must differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    /// A process-unique id
    pub fn fresh() -> Self {
        PlayerId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Adopt a recorded id; later fresh ids will not collide with it
    pub fn adopt(id: u64) -> Result<Self, MatchError> {
        if id > MAX_RECORDED_ID {
            return Err(MatchError::InvalidPlayerId(id));
        }
        NEXT_ID.fetch_max(id + 1, Ordering::Relaxed);
        Ok(PlayerId(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    strategy: Box<dyn Strategy>,
    seed: Option<u64>,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            id: PlayerId::fresh(),
            name: name.into(),
            strategy,
            seed: None,
        }
    }

    pub fn from_config(name: impl Into<String>, config: StrategyConfig) -> Result<Self, MatchError> {
        Ok(Self::new(name, config.build()?))
    }

    /// Build from a configuration whose random draws follow `seed`
    pub fn seeded(
        name: impl Into<String>,
        config: StrategyConfig,
        seed: u64,
    ) -> Result<Self, MatchError> {
        let mut player = Self::new(name, config.build_seeded(seed)?);
        player.seed = Some(seed);
        Ok(player)
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn config(&self) -> StrategyConfig {
        self.strategy.config()
    }

    /// Seed the strategy was built from, if it was built from one
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Same name and configuration, new identity. The strategy's current
    /// state (a triggered grudge, the RNG position) carries over into an
    /// independent instance.
    pub fn copy(&self) -> Self {
        Self {
            id: PlayerId::fresh(),
            name: self.name.clone(),
            strategy: self.strategy.box_clone(),
            seed: self.seed,
        }
    }

    pub fn reseed(&mut self, stream: u32) {
        self.strategy.reseed(stream);
    }

    pub(crate) fn decide(&mut self, history: &OutcomeLog, seat: Seat) -> Choice {
        self.strategy.decide(history, seat)
    }

    /// Persisted form. Rebuilding it restarts the strategy from its seed;
    /// streams picked by `reseed` are not recorded.
    pub fn record(&self) -> PlayerRecord {
        PlayerRecord {
            id: Some(self.id),
            name: self.name.clone(),
            strategy: self.config(),
            seed: self.seed,
        }
    }
}

/// Persisted form of a player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Recorded identity; a fresh one is assigned when absent
    #[serde(default)]
    pub id: Option<PlayerId>,
    pub name: String,
    pub strategy: StrategyConfig,
    /// Seed for random strategies; process entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlayerRecord {
    pub fn new(name: impl Into<String>, strategy: StrategyConfig) -> Self {
        Self { id: None, name: name.into(), strategy, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl TryFrom<&PlayerRecord> for Player {
    type Error = MatchError;

    fn try_from(record: &PlayerRecord) -> Result<Self, Self::Error> {
        let strategy = match record.seed {
            Some(seed) => record.strategy.build_seeded(seed)?,
            None => record.strategy.build()?,
        };
        let id = match record.id {
            Some(id) => PlayerId::adopt(id.get())?,
            None => PlayerId::fresh(),
        };
        Ok(Player { id, name: record.name.clone(), strategy, seed: record.seed })
    }
}
