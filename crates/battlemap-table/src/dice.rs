//! Polyhedral dice and a pool that rolls them together.

#![warn(missing_docs)]

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::debug;

use crate::error::TableError;

/// One of the standard polyhedral dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
}

impl Die {
    /// All dice, smallest first.
    pub const ALL: [Die; 6] = [Die::D4, Die::D6, Die::D8, Die::D10, Die::D12, Die::D20];

    /// Number of faces.
    pub const fn sides(self) -> u32 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
        }
    }

    /// Looks up the die with `sides` faces.
    ///
    /// # Errors
    ///
    /// Returns `Err(TableError::UnsupportedDie)` for any other face count.
    pub fn from_sides(sides: u32) -> Result<Self, TableError> {
        Die::ALL
            .into_iter()
            .find(|d| d.sides() == sides)
            .ok_or(TableError::UnsupportedDie(sides))
    }

    /// Rolls this die once, uniformly in `1..=sides`.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.random_range(1..=self.sides())
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl FromStr for Die {
    type Err = TableError;

    /// Parses `d20`, `D6` or a bare face count such as `12`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(['d', 'D']).unwrap_or(trimmed);
        let sides: u32 = digits
            .parse()
            .map_err(|_| TableError::InvalidNotation(s.to_string()))?;
        Die::from_sides(sides)
    }
}

/// Result of rolling a [`DicePool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// Each die paired with the face it landed on, in pool order.
    pub rolls: Vec<(Die, u32)>,
    /// Sum of all faces.
    pub total: u32,
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (die, value)) in self.rolls.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}({})", die, value)?;
        }
        write!(f, " = {}", self.total)
    }
}

/// Dice selected for the next roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DicePool {
    dice: Vec<Die>,
}

impl DicePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a die to the end of the pool.
    pub fn add(&mut self, die: Die) {
        self.dice.push(die);
    }

    /// Removes the die at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err(TableError::IndexOutOfRange)` if no die is at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Die, TableError> {
        if index >= self.dice.len() {
            return Err(TableError::IndexOutOfRange {
                index,
                len: self.dice.len(),
            });
        }
        Ok(self.dice.remove(index))
    }

    /// Empties the pool.
    pub fn clear(&mut self) {
        self.dice.clear();
    }

    /// Dice in the pool, in the order they were added.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Rolls every die in the pool.
    ///
    /// Returns `None` for an empty pool, since there is nothing to show.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<RollOutcome> {
        if self.dice.is_empty() {
            return None;
        }
        let rolls: Vec<(Die, u32)> = self.dice.iter().map(|d| (*d, d.roll(rng))).collect();
        let total: u32 = rolls.iter().map(|(_, v)| v).sum();
        debug!(dice = self.dice.len(), total, "Rolled dice pool");
        Some(RollOutcome { rolls, total })
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dice.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, die) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", die)?;
        }
        Ok(())
    }
}
