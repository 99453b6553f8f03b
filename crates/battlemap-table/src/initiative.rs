//! Turn order for combat encounters.
//!
//! The tracker keeps combatants in display order together with the index of
//! whoever is acting. Reordering by hand (drag and drop in a list) keeps the
//! turn pointer on the same combatant.

#![warn(missing_docs)]

use tracing::{debug, warn};

use crate::error::TableError;

/// One participant in the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    /// Stable identifier.
    pub id: String,
    /// Display name, used to break initiative ties.
    pub name: String,
    /// Initiative score; higher acts first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiative: i32,
}

impl Combatant {
    /// Creates a combatant.
    pub fn new(id: impl Into<String>, name: impl Into<String>, initiative: i32) -> Self {
        Combatant {
            id: id.into(),
            name: name.into(),
            initiative,
        }
    }
}

/// Parses typed initiative the way a number field does.
///
/// Reads an optional sign and the leading digits, ignoring anything after
/// them. Text without leading digits counts as 0.
pub fn parse_initiative(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let magnitude: i64 = rest[..digits_len]
        .parse()
        .unwrap_or(if digits_len > 0 { i64::MAX } else { 0 });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Combatants in turn order plus the index of the one acting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitiativeTracker {
    entries: Vec<Combatant>,
    current: usize,
}

impl InitiativeTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker holding `entries` in the given order.
    pub fn with_combatants(entries: Vec<Combatant>) -> Self {
        InitiativeTracker {
            entries,
            current: 0,
        }
    }

    /// Appends a combatant at the end of the order.
    pub fn add(&mut self, combatant: Combatant) {
        self.entries.push(combatant);
    }

    /// Removes the combatant with `id`.
    ///
    /// The turn pointer stays on whoever was acting. Removing the acting
    /// combatant hands the turn to the one after it, wrapping to the top.
    ///
    /// # Errors
    ///
    /// Returns `Err(TableError::UnknownCombatant)` if no combatant has `id`.
    pub fn remove(&mut self, id: &str) -> Result<Combatant, TableError> {
        let index = self
            .entries
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| TableError::UnknownCombatant(id.to_string()))?;
        let removed = self.entries.remove(index);
        if index < self.current {
            self.current -= 1;
        }
        if self.current >= self.entries.len() {
            self.current = 0;
        }
        debug!(id, remaining = self.entries.len(), "Removed combatant");
        Ok(removed)
    }

    /// Combatants in turn order.
    pub fn entries(&self) -> &[Combatant] {
        &self.entries
    }

    /// Index of the acting combatant.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The acting combatant, if any.
    pub fn current(&self) -> Option<&Combatant> {
        self.entries.get(self.current)
    }

    /// Sets the initiative of the combatant with `id`.
    ///
    /// # Errors
    ///
    /// Returns `Err(TableError::UnknownCombatant)` if no combatant has `id`.
    pub fn set_initiative(&mut self, id: &str, value: i32) -> Result<(), TableError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TableError::UnknownCombatant(id.to_string()))?;
        entry.initiative = value;
        Ok(())
    }

    /// Sorts by initiative, highest first, and restarts the round.
    ///
    /// Ties go alphabetically by name ignoring case, so `"dragon"` sorts
    /// before `"Golem"`. Names differing only in case fall back to byte order.
    pub fn order_by_initiative(&mut self) {
        self.entries.sort_by(|a, b| {
            b.initiative
                .cmp(&a.initiative)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });
        self.current = 0;
        debug!(combatants = self.entries.len(), "Ordered by initiative");
    }

    /// Advances to the next combatant, wrapping to the top of the order.
    pub fn next_turn(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.entries.len();
    }

    /// Zeroes every initiative and restarts the round.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.initiative = 0;
        }
        self.current = 0;
    }

    /// Moves the combatant at `from` to position `to`.
    ///
    /// The turn pointer follows the combatant it pointed at.
    ///
    /// # Errors
    ///
    /// Returns `Err(TableError::IndexOutOfRange)` if either index is past the end.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), TableError> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                warn!(index, len, "Rejected initiative reorder");
                return Err(TableError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        if self.current == from {
            self.current = to;
        } else if self.current > from && self.current <= to {
            self.current -= 1;
        } else if self.current < from && self.current >= to {
            self.current += 1;
        }

        let moved = self.entries.remove(from);
        self.entries.insert(to, moved);
        Ok(())
    }
}
