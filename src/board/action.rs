//! Action symbols understood by the host.
//!
//! Ships may move one cell or convert into a shipyard; shipyards may spawn a
//! ship. Staying put is expressed by leaving the unit out of the action map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::point::Direction;

/// A single unit order for the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    North,
    East,
    South,
    West,
    Convert,
    Spawn,
}

impl From<Direction> for Action {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => Action::North,
            Direction::East => Action::East,
            Direction::South => Action::South,
            Direction::West => Action::West,
        }
    }
}

/// Orders for one turn, keyed by the host's unit id string.
pub type ActionMap = BTreeMap<String, Action>;
