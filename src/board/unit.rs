//! Ships, shipyards and their owners.

use std::cmp::Ordering;
use std::fmt;

use super::point::Point;

/// Index of a player in the host's player list.
pub type PlayerId = usize;

/// Host-assigned identifier of a ship or shipyard, e.g. `"12-3"`.
///
/// Ordering compares the dash-separated components numerically so that
/// `"2-1"` sorts before `"10-1"`. Ids that do not follow the pattern fall
/// back to plain string order after all well-formed ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading numeric component of the id, or 0 if there is none.
    pub fn serial(&self) -> u64 {
        self.0
            .split('-')
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    fn numeric_key(&self) -> Option<(u64, u64)> {
        let (a, b) = self.0.split_once('-')?;
        Some((a.parse().ok()?, b.parse().ok()?))
    }
}

impl Ord for UnitId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_key(), other.numeric_key()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for UnitId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mobile unit carrying halite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    pub id: UnitId,
    pub position: Point,
    pub halite: u32,
    pub owner: PlayerId,
}

/// A stationary structure that can spawn ships and accept deposits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipyard {
    pub id: UnitId,
    pub position: Point,
    pub owner: PlayerId,
}

/// A participant: banked halite plus indices into the board's unit lists,
/// kept in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub halite: u32,
    pub ships: Vec<usize>,
    pub shipyards: Vec<usize>,
}
