//! Payoff matrix for the Prisoner's Dilemma
//!
//! ```text
//!  first \ second | cooperate | compete
//!  ---------------+-----------+--------
//!  cooperate      |   a \ a   |  b \ c
//!  compete        |   c \ b   |  d \ d
//! ```
//!
//! Values are from the first seat's perspective; the second seat's
//! payoff swaps the asymmetric entries.

use serde::{Deserialize, Serialize};
use crate::outcome::{Event, EventHistogram, Seat};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    /// `a`: both cooperate
    pub both_cooperate: f64,
    /// `b`: cooperate while the opponent competes
    pub cooperate_alone: f64,
    /// `c`: compete while the opponent cooperates
    pub compete_alone: f64,
    /// `d`: both compete
    pub both_compete: f64,
}

impl PayoffMatrix {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            both_cooperate: a,
            cooperate_alone: b,
            compete_alone: c,
            both_compete: d,
        }
    }

    pub fn from_array([a, b, c, d]: [f64; 4]) -> Self {
        Self::new(a, b, c, d)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.both_cooperate, self.cooperate_alone, self.compete_alone, self.both_compete]
    }

    /// `c > a`, `b > d` and `d > a`. Not enforced anywhere.
    pub fn follows_dilemma_ordering(&self) -> bool {
        self.compete_alone > self.both_cooperate
            && self.cooperate_alone > self.both_compete
            && self.both_compete > self.both_cooperate
    }

    /// Payoff a seat receives for one round classified as `event`
    pub fn payoff(&self, event: Event, seat: Seat) -> f64 {
        match (event, seat) {
            (Event::BothCooperate, _) => self.both_cooperate,
            (Event::BothCompete, _) => self.both_compete,
            (Event::CooperateCompete, Seat::First) | (Event::CompeteCooperate, Seat::Second) => {
                self.cooperate_alone
            }
            (Event::CompeteCooperate, Seat::First) | (Event::CooperateCompete, Seat::Second) => {
                self.compete_alone
            }
        }
    }

    /// Total score of a seat, folded from event counts
    pub fn score(&self, histogram: &EventHistogram, seat: Seat) -> f64 {
        let count = |event| histogram.count(event) as f64;
        let common = count(Event::BothCooperate) * self.both_cooperate
            + count(Event::BothCompete) * self.both_compete;
        match seat {
            Seat::First => {
                common
                    + count(Event::CooperateCompete) * self.cooperate_alone
                    + count(Event::CompeteCooperate) * self.compete_alone
            }
            Seat::Second => {
                common
                    + count(Event::CooperateCompete) * self.compete_alone
                    + count(Event::CompeteCooperate) * self.cooperate_alone
            }
        }
    }
}

impl Default for PayoffMatrix {
    /// The classic (3, 0, 5, 1) matrix
    fn default() -> Self {
        Self::new(3.0, 0.0, 5.0, 1.0)
    }
}
