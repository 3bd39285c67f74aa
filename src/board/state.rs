//! Board snapshot.
//!
//! Holds the complete view of one turn: halite per cell, every ship and
//! shipyard on the board, and each player's bank. Cells store indices into
//! the unit lists so occupancy lookups are O(1).

use super::point::Point;
use super::unit::{Player, PlayerId, Ship, Shipyard, UnitId};

/// One grid cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub halite: f64,
    /// Index into `Board::ships`.
    pub ship: Option<usize>,
    /// Index into `Board::shipyards`.
    pub shipyard: Option<usize>,
}

/// Immutable per-turn view of the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub size: usize,
    pub step: u32,
    pub current_player: PlayerId,
    pub cells: Vec<Cell>,
    pub ships: Vec<Ship>,
    pub shipyards: Vec<Shipyard>,
    pub players: Vec<Player>,
}

impl Board {
    /// Creates a board with no halite and no units.
    pub fn empty(size: usize, step: u32, player_count: usize, current_player: PlayerId) -> Self {
        Board {
            size,
            step,
            current_player,
            cells: vec![Cell::default(); size * size],
            ships: Vec::new(),
            shipyards: Vec::new(),
            players: (0..player_count)
                .map(|id| Player {
                    id,
                    ..Player::default()
                })
                .collect(),
        }
    }

    pub fn cell(&self, point: Point) -> &Cell {
        &self.cells[point.to_index(self.size)]
    }

    /// Sets the halite stock of a cell.
    pub fn set_halite(&mut self, point: Point, halite: f64) {
        let idx = point.to_index(self.size);
        self.cells[idx].halite = halite;
    }

    /// Sets a player's banked halite.
    pub fn set_player_halite(&mut self, player: PlayerId, halite: u32) {
        self.players[player].halite = halite;
    }

    /// Places a ship. Returns false if the cell already holds a ship or the
    /// owner is not a player on this board.
    pub fn add_ship(&mut self, id: UnitId, position: Point, halite: u32, owner: PlayerId) -> bool {
        let cell_idx = position.to_index(self.size);
        if self.cells[cell_idx].ship.is_some() || owner >= self.players.len() {
            return false;
        }
        let idx = self.ships.len();
        self.ships.push(Ship {
            id,
            position,
            halite,
            owner,
        });
        self.cells[cell_idx].ship = Some(idx);

        let ships = &self.ships;
        let owned = &mut self.players[owner].ships;
        let at = owned.partition_point(|&i| ships[i].id < ships[idx].id);
        owned.insert(at, idx);
        true
    }

    /// Places a shipyard. Returns false if the cell already holds one or the
    /// owner is not a player on this board.
    pub fn add_shipyard(&mut self, id: UnitId, position: Point, owner: PlayerId) -> bool {
        let cell_idx = position.to_index(self.size);
        if self.cells[cell_idx].shipyard.is_some() || owner >= self.players.len() {
            return false;
        }
        let idx = self.shipyards.len();
        self.shipyards.push(Shipyard {
            id,
            position,
            owner,
        });
        self.cells[cell_idx].shipyard = Some(idx);

        let yards = &self.shipyards;
        let owned = &mut self.players[owner].shipyards;
        let at = owned.partition_point(|&i| yards[i].id < yards[idx].id);
        owned.insert(at, idx);
        true
    }

    pub fn ship_at(&self, point: Point) -> Option<&Ship> {
        self.cell(point).ship.map(|i| &self.ships[i])
    }

    pub fn shipyard_at(&self, point: Point) -> Option<&Shipyard> {
        self.cell(point).shipyard.map(|i| &self.shipyards[i])
    }

    /// The player this snapshot was produced for.
    pub fn me(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Our ships in ascending id order.
    pub fn my_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.me().ships.iter().map(move |&i| &self.ships[i])
    }

    /// Our shipyards in ascending id order.
    pub fn my_shipyards(&self) -> impl Iterator<Item = &Shipyard> + '_ {
        self.me().shipyards.iter().map(move |&i| &self.shipyards[i])
    }

    /// Number of ships on the board across all players.
    pub fn total_ships(&self) -> usize {
        self.ships.len()
    }

    /// Mean halite over cells that hold any, truncated to an integer.
    /// Zero when the board is bare.
    pub fn average_halite(&self) -> u32 {
        let (sum, count) = self
            .cells
            .iter()
            .filter(|c| c.halite > 0.0)
            .fold((0.0, 0u32), |(sum, count), c| (sum + c.halite, count + 1));
        if count == 0 {
            0
        } else {
            (sum / f64::from(count)) as u32
        }
    }
}
