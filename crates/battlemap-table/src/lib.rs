#![warn(missing_docs)]
#![doc = "Table utilities for tabletop sessions."]
#![doc = ""]
#![doc = "This crate provides a dice pool with the standard polyhedral dice and an"]
#![doc = "initiative tracker that keeps combat turn order."]

pub mod dice;
pub mod error;
pub mod initiative;

pub use dice::{DicePool, Die, RollOutcome};
pub use error::TableError;
pub use initiative::{Combatant, InitiativeTracker, parse_initiative};
