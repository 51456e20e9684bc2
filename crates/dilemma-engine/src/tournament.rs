//! Round-robin tournaments over player templates
//!
//! Each match plays fresh copies of its two templates, so matches share no
//! mutable state and the templates themselves never change.

use log::info;
use serde::{Deserialize, Serialize};
use crate::error::MatchError;
use crate::game::Match;
use crate::outcome::EventHistogram;
use crate::payoff::PayoffMatrix;
use crate::player::{Player, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub rounds: u32,
    pub payoffs: PayoffMatrix,
    /// Also pair every entrant with a copy of itself
    #[serde(default)]
    pub self_play: bool,
}

/// Outcome of one pairing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub match_index: u32,
    /// Entrant indices, `first <= second`
    pub first: usize,
    pub second: usize,
    pub histogram: EventHistogram,
    pub scores: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub entrant: usize,
    pub id: PlayerId,
    pub name: String,
    pub total_score: f64,
    pub matches: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub pairings: Vec<PairingResult>,
    /// Sorted by total score, best first
    pub standings: Vec<Standing>,
}

/// All entrant pairs `(i, j)` with `i < j` (`i <= j` with self play), in order
pub fn round_robin_pairings(participant_count: usize, self_play: bool) -> Vec<(usize, usize)> {
    let n = participant_count;
    (0..n)
        .flat_map(|i| {
            let start = if self_play { i } else { i + 1 };
            (start..n).map(move |j| (i, j))
        })
        .collect()
}

/// Play every pairing once
///
/// Random strategies are moved onto a per-match stream so that repeated
/// copies of one template do not replay identical draws.
pub fn run_round_robin(
    entrants: &[Player],
    config: &TournamentConfig,
) -> Result<TournamentResult, MatchError> {
    let mut standings: Vec<Standing> = entrants
        .iter()
        .enumerate()
        .map(|(entrant, player)| Standing {
            entrant,
            id: player.id(),
            name: player.name().to_string(),
            total_score: 0.0,
            matches: 0,
        })
        .collect();

    let mut pairings = Vec::new();
    for (match_index, (i, j)) in round_robin_pairings(entrants.len(), config.self_play)
        .into_iter()
        .enumerate()
    {
        let match_index = match_index as u32;
        let mut first = entrants[i].copy();
        let mut second = entrants[j].copy();
        first.reseed(match_index.wrapping_mul(2));
        second.reseed(match_index.wrapping_mul(2).wrapping_add(1));

        let game = Match::new(config.rounds, first, second, Some(config.payoffs))?;
        let (score_first, score_second) = game.scores()?;

        standings[i].total_score += score_first;
        standings[i].matches += 1;
        standings[j].total_score += score_second;
        standings[j].matches += 1;

        pairings.push(PairingResult {
            match_index,
            first: i,
            second: j,
            histogram: game.event_histogram(),
            scores: [score_first, score_second],
        });
    }

    standings.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    if let Some(leader) = standings.first() {
        info!(
            "round robin: {} entrants, {} matches, leader {} with {}",
            entrants.len(),
            pairings.len(),
            leader.name,
            leader.total_score
        );
    }

    Ok(TournamentResult { pairings, standings })
}
