//! Board representation and game-state types.
//!
//! Contains grid geometry, units and their owners, the action symbols sent
//! back to the host, and the per-turn board snapshot.

pub mod action;
pub mod point;
pub mod state;
pub mod unit;

pub use action::{Action, ActionMap};
pub use point::{Direction, Point, ALL_DIRECTIONS};
pub use state::{Board, Cell};
pub use unit::{Player, PlayerId, Ship, Shipyard, UnitId};
