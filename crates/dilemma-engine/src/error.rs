//! Error types for match construction, queries and reporting

use crate::player::PlayerId;

/// Errors raised by the engine. All of them are caller-input errors detected
/// at the offending call.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchError {
    /// A strategy parameter is out of its valid range.
    InvalidConfig { parameter: &'static str, value: f64 },
    /// Both seats reference the same player identity.
    DuplicatePlayer { id: PlayerId },
    /// Seat index outside {0, 1}.
    InvalidSeat(usize),
    /// A recorded player id beyond the range that may be adopted.
    InvalidPlayerId(u64),
    /// A score was requested before a payoff matrix was configured.
    PayoffsUnset,
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::InvalidConfig { parameter, value } =>
                write!(f, "invalid strategy parameter {}: {}", parameter, value),
            MatchError::DuplicatePlayer { id } =>
                write!(f, "player {} cannot play against itself", id),
            MatchError::InvalidSeat(seat) =>
                write!(f, "invalid seat {} (expected 0 or 1)", seat),
            MatchError::InvalidPlayerId(id) =>
                write!(f, "player id {} is out of range", id),
            MatchError::PayoffsUnset => write!(f, "the payoffs are not set"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Errors raised while labelling a match for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportError {
    /// Display name exceeds the table column width.
    NameTooLong { name: String, max: usize },
}

impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportError::NameTooLong { name, max } =>
                write!(f, "name {:?} is too long (more than {} characters)", name, max),
        }
    }
}

impl std::error::Error for ReportError {}
