//! Round history ledger
//!
//! Append-only record of both seats' choices, with the per-seat
//! chronological views and the four-bucket event histogram derived from it.

use serde::{Deserialize, Serialize};
use crate::error::MatchError;

/// A choice in the Prisoner's Dilemma. Cooperation is `false`/0,
/// competition is `true`/1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Cooperate,
    Compete,
}

impl Choice {
    pub fn is_compete(self) -> bool {
        self == Choice::Compete
    }

    /// 0 for cooperate, 1 for compete
    pub fn as_bit(self) -> u8 {
        self.is_compete() as u8
    }
}

impl From<bool> for Choice {
    fn from(compete: bool) -> Self {
        if compete { Choice::Compete } else { Choice::Cooperate }
    }
}

impl From<Choice> for bool {
    fn from(choice: Choice) -> Self {
        choice.is_compete()
    }
}

/// One of the two fixed positions in a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::First, Seat::Second];

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

impl TryFrom<usize> for Seat {
    type Error = MatchError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Seat::First),
            1 => Ok(Seat::Second),
            other => Err(MatchError::InvalidSeat(other)),
        }
    }
}

/// Classification of a round by its joint choice pair, seen from the first seat.
/// The discriminant is `2 * first + second`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    BothCooperate = 0,
    CooperateCompete = 1,
    CompeteCooperate = 2,
    BothCompete = 3,
}

impl Event {
    pub const ALL: [Event; 4] = [
        Event::BothCooperate,
        Event::CooperateCompete,
        Event::CompeteCooperate,
        Event::BothCompete,
    ];

    pub fn classify(first: Choice, second: Choice) -> Self {
        match (first, second) {
            (Choice::Cooperate, Choice::Cooperate) => Event::BothCooperate,
            (Choice::Cooperate, Choice::Compete) => Event::CooperateCompete,
            (Choice::Compete, Choice::Cooperate) => Event::CompeteCooperate,
            (Choice::Compete, Choice::Compete) => Event::BothCompete,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A recorded round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub first: Choice,
    pub second: Choice,
}

impl Round {
    pub fn choice(&self, seat: Seat) -> Choice {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }

    pub fn event(&self) -> Event {
        Event::classify(self.first, self.second)
    }
}

/// Round counts per event, indexed by [`Event::index`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventHistogram([u32; 4]);

impl EventHistogram {
    pub fn from_counts(counts: [u32; 4]) -> Self {
        Self(counts)
    }

    pub fn count(&self, event: Event) -> u32 {
        self.0[event.index()]
    }

    pub fn counts(&self) -> [u32; 4] {
        self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    fn record(&mut self, event: Event) {
        self.0[event.index()] += 1;
    }
}

/// Ordered sequence of rounds played so far
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeLog {
    first: Vec<Choice>,
    second: Vec<Choice>,
    histogram: EventHistogram,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            first: Vec::with_capacity(rounds),
            second: Vec::with_capacity(rounds),
            histogram: EventHistogram::default(),
        }
    }

    pub fn record_round(&mut self, first: Choice, second: Choice) {
        self.first.push(first);
        self.second.push(second);
        self.histogram.record(Event::classify(first, second));
    }

    pub fn round_count(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Chronological choices of one seat
    pub fn sequence(&self, seat: Seat) -> &[Choice] {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    /// Chronological choices of the seat at `index`; fails for anything but 0 or 1
    pub fn sequence_for_seat(&self, index: usize) -> Result<&[Choice], MatchError> {
        Ok(self.sequence(Seat::try_from(index)?))
    }

    pub fn last_choice(&self, seat: Seat) -> Option<Choice> {
        self.sequence(seat).last().copied()
    }

    pub fn event_histogram(&self) -> EventHistogram {
        self.histogram
    }

    pub fn rounds(&self) -> impl Iterator<Item = Round> + '_ {
        self.first
            .iter()
            .zip(self.second.iter())
            .map(|(&first, &second)| Round { first, second })
    }
}
