//! Plain-text and serializable summaries of a completed match

use core::fmt;
use serde::{Deserialize, Serialize};
use crate::error::ReportError;
use crate::game::Match;
use crate::outcome::{Choice, Event, EventHistogram, Seat};
use crate::payoff::PayoffMatrix;

/// Widest name that fits the table header
pub const MAX_NAME_LEN: usize = 18;

const RULE: &str = "-------------------------------------------";

/// Labels for both seats; identical names get ` (1)` / ` (2)` suffixes.
pub fn seat_labels(first: &str, second: &str) -> Result<[String; 2], ReportError> {
    for name in [first, second] {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ReportError::NameTooLong { name: name.to_string(), max: MAX_NAME_LEN });
        }
    }
    if first == second {
        Ok([format!("{} (1)", first), format!("{} (2)", second)])
    } else {
        Ok([first.to_string(), second.to_string()])
    }
}

/// Everything a renderer needs from a completed match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub labels: [String; 2],
    pub rounds: u32,
    pub histogram: EventHistogram,
    /// Per-seat choices as 0 (cooperate) / 1 (compete)
    pub sequences: [Vec<u8>; 2],
    pub payoffs: Option<PayoffMatrix>,
    pub scores: Option<[f64; 2]>,
}

impl MatchReport {
    pub fn from_match(game: &Match) -> Result<Self, ReportError> {
        let [first, second] = game.players();
        let labels = seat_labels(first.name(), second.name())?;
        let histogram = game.event_histogram();
        let bits = |seat: Seat| -> Vec<u8> {
            game.log().sequence(seat).iter().map(|c| c.as_bit()).collect()
        };

        Ok(Self {
            labels,
            rounds: game.round_budget(),
            histogram,
            sequences: [bits(Seat::First), bits(Seat::Second)],
            payoffs: game.payoffs().copied(),
            scores: game
                .payoffs()
                .map(|m| [m.score(&histogram, Seat::First), m.score(&histogram, Seat::Second)]),
        })
    }

    /// Both players' payoffs per joint choice, `None` without a matrix
    pub fn payoff_table(&self) -> Option<String> {
        let m = self.payoffs?;
        Some(render(|out| self.write_payoff_table(out, &m)))
    }

    /// Round counts per joint choice
    pub fn event_table(&self) -> String {
        render(|out| self.write_event_table(out))
    }

    /// Chronological choices of each seat
    pub fn sequence_listing(&self) -> String {
        render(|out| self.write_sequence_listing(out))
    }

    /// Final scores, `None` without a matrix
    pub fn score_listing(&self) -> Option<String> {
        let scores = self.scores?;
        Some(render(|out| self.write_score_listing(out, scores)))
    }

    pub fn choices(&self, seat: Seat) -> impl Iterator<Item = Choice> + '_ {
        self.sequences[seat.index()].iter().map(|&bit| Choice::from(bit == 1))
    }

    fn write_header<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "| {:>18} / {:<18} |", self.labels[0], self.labels[1])?;
        writeln!(out, "{}", RULE)?;
        writeln!(out, "| {:<11} | {:<11} | {:<11} |", "one \\ two", "cooperation", "competition")?;
        writeln!(out, "{}", RULE)
    }

    fn write_payoff_table<W: fmt::Write>(&self, out: &mut W, m: &PayoffMatrix) -> fmt::Result {
        let cell = |mine: f64, theirs: f64| {
            format!("{:>4} \\ {:<4}", format_score(mine), format_score(theirs))
        };
        let rows = [
            ("cooperation", cell(m.both_cooperate, m.both_cooperate), cell(m.cooperate_alone, m.compete_alone)),
            ("competition", cell(m.compete_alone, m.cooperate_alone), cell(m.both_compete, m.both_compete)),
        ];
        self.write_header(out)?;
        for (label, coop, comp) in rows {
            writeln!(out, "| {:<11} | {} | {} |", label, coop, comp)?;
            writeln!(out, "{}", RULE)?;
        }
        Ok(())
    }

    fn write_event_table<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let rows = [
            ("cooperation", Event::BothCooperate, Event::CooperateCompete),
            ("competition", Event::CompeteCooperate, Event::BothCompete),
        ];
        self.write_header(out)?;
        for (label, coop, comp) in rows {
            writeln!(
                out,
                "| {:<11} | {:<11} | {:<11} |",
                label,
                self.histogram.count(coop),
                self.histogram.count(comp)
            )?;
            writeln!(out, "{}", RULE)?;
        }
        Ok(())
    }

    fn write_sequence_listing<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let width = self.label_width();
        writeln!(out, "Results (0 is cooperation, 1 is competition):")?;
        for (label, sequence) in self.labels.iter().zip(self.sequences.iter()) {
            let joined = sequence.iter().map(u8::to_string).collect::<Vec<_>>().join(", ");
            writeln!(out, "{:<width$}: {}", label, joined, width = width)?;
        }
        Ok(())
    }

    fn write_score_listing<W: fmt::Write>(&self, out: &mut W, scores: [f64; 2]) -> fmt::Result {
        let width = self.label_width();
        writeln!(out, "Scores:")?;
        for (label, score) in self.labels.iter().zip(scores) {
            writeln!(out, "{:<width$}: {}", label, format_score(score), width = width)?;
        }
        Ok(())
    }

    fn label_width(&self) -> usize {
        self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(m) = &self.payoffs {
            self.write_payoff_table(f, m)?;
        }
        self.write_event_table(f)?;
        self.write_sequence_listing(f)?;
        if let Some(scores) = self.scores {
            self.write_score_listing(f, scores)?;
        }
        Ok(())
    }
}

/// Run a table writer into a fresh `String`; writing to a `String` never fails.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    match write(&mut out) {
        Ok(()) => out,
        Err(fmt::Error) => String::new(),
    }
}

/// Whole numbers print without a fractional part
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
