//! Error types for the table utilities.

use thiserror::Error;

/// Errors returned by the dice pool and the initiative tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Returned for a die size other than 4, 6, 8, 10, 12 or 20.
    #[error("Unsupported die: d{0}")]
    UnsupportedDie(u32),
    /// Returned when die notation such as `d20` cannot be parsed.
    #[error("Invalid die notation: {0:?}")]
    InvalidNotation(String),
    /// Returned when an index does not address an entry.
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries at the time of the call.
        len: usize,
    },
    /// Returned when no combatant has the given id.
    #[error("Unknown combatant: {0}")]
    UnknownCombatant(String),
}
