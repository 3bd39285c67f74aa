//! The swarm controller.
//!
//! Decides one action per owned ship and shipyard for a single turn. Ships
//! walk an ordered list of tactics and take the first one that applies;
//! shipyards spawn while the fleet is under its cap and the bank allows.
//!
//! A set of claimed cells tracks where our units will stand after the turn.
//! It starts as the cells of our ships; moving releases the origin and
//! claims the destination, converting releases the cell and spawning claims
//! the shipyard cell. No order ever targets a claimed cell, so two of our
//! units never end the turn on the same cell.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::board::{
    Action, ActionMap, Board, Direction, PlayerId, Point, Ship, Shipyard, ALL_DIRECTIONS,
};
use crate::board::Direction::{East, North, South, West};
use crate::config::{GameConstants, Tuning};

/// Patrol loops. Each ship follows one, picked by its id.
pub const MOVEMENT_TACTICS: [[Direction; 4]; 8] = [
    [North, East, South, West],
    [North, West, South, East],
    [East, South, West, North],
    [East, North, West, South],
    [South, West, North, East],
    [South, East, North, West],
    [West, North, East, South],
    [West, South, East, North],
];

/// A ship behaviour, tried in `SHIP_TACTICS` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipTactic {
    /// Final step: bank the cargo by converting.
    Endgame,
    /// No shipyard yet: found one while it is still early.
    FoundShipyard,
    /// Stay and mine a rich, safe cell.
    Harvest,
    /// Step onto the richest safe neighbour.
    SeekHalite,
    /// Drop cargo at an adjacent shipyard.
    Unload,
    /// Circle the board along the ship's patrol loop.
    Patrol,
    /// Cornered with a full hold: convert before being rammed.
    SafetyConvert,
    /// Ram an adjacent enemy shipyard.
    CrashShipyard,
}

pub const SHIP_TACTICS: [ShipTactic; 8] = [
    ShipTactic::Endgame,
    ShipTactic::FoundShipyard,
    ShipTactic::Harvest,
    ShipTactic::SeekHalite,
    ShipTactic::Unload,
    ShipTactic::Patrol,
    ShipTactic::SafetyConvert,
    ShipTactic::CrashShipyard,
];

impl ShipTactic {
    pub const fn name(self) -> &'static str {
        match self {
            ShipTactic::Endgame => "endgame",
            ShipTactic::FoundShipyard => "found_shipyard",
            ShipTactic::Harvest => "harvest",
            ShipTactic::SeekHalite => "seek_halite",
            ShipTactic::Unload => "unload",
            ShipTactic::Patrol => "patrol",
            ShipTactic::SafetyConvert => "safety_convert",
            ShipTactic::CrashShipyard => "crash_shipyard",
        }
    }
}

/// How a ship's order was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Tactic(ShipTactic),
    /// No tactic applied; a random non-colliding order was drawn.
    Fallback,
}

impl Choice {
    pub const fn name(self) -> &'static str {
        match self {
            Choice::Tactic(t) => t.name(),
            Choice::Fallback => "fallback",
        }
    }
}

/// The outcome for one ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipDecision {
    pub ship: String,
    pub choice: Choice,
}

/// Thresholds derived once per turn from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnParams {
    /// Orders issued now are the last ones that count.
    pub final_step: bool,
    /// The game is in its first half.
    pub early_game: bool,
    /// Cells must hold more than this to be worth mining.
    pub low_halite: u32,
    /// Bank plus cargo needed to found the first shipyard.
    pub convert_threshold: u32,
    /// Fleet size above which shipyards stop spawning.
    pub max_ships: usize,
}

impl TurnParams {
    pub fn compute(board: &Board, constants: &GameConstants, tuning: &Tuning) -> Self {
        let average = board.average_halite();
        let early_game = board.step < constants.half_time();

        let total_ships = board.total_ships();
        let cap = if early_game && total_ships > 0 {
            (average as usize / total_ships) * tuning.ship_cap_factor as usize
        } else {
            0
        };

        TurnParams {
            final_step: constants.final_step() == Some(board.step),
            early_game,
            low_halite: (average / 2).max(tuning.low_halite_floor),
            convert_threshold: constants
                .convert_cost
                .saturating_add(tuning.convert_spawn_multiple.saturating_mul(constants.spawn_cost)),
            max_ships: cap.max(tuning.min_ships as usize),
        }
    }
}

/// Everything decided for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub actions: ActionMap,
    pub ships: Vec<ShipDecision>,
    pub spawns: usize,
    pub params: TurnParams,
    /// Bank left after this turn's spending.
    pub halite_left: u32,
}

impl TurnReport {
    /// How the given ship's order was chosen, if it is ours.
    pub fn choice_of(&self, ship: &str) -> Option<Choice> {
        self.ships.iter().find(|d| d.ship == ship).map(|d| d.choice)
    }

    /// Number of ships whose order came from `choice`.
    pub fn count(&self, choice: Choice) -> usize {
        self.ships.iter().filter(|d| d.choice == choice).count()
    }
}

/// Decides all orders for the current player of `board`.
pub fn plan_turn(
    board: &Board,
    constants: &GameConstants,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> TurnReport {
    let mut plan = TurnPlan::new(board, constants, tuning);
    for ship in board.my_ships() {
        plan.decide_ship(ship, rng);
    }
    for yard in board.my_shipyards() {
        plan.decide_shipyard(yard);
    }
    plan.finish()
}

/// Per-turn bookkeeping shared by all tactics.
struct TurnPlan<'a> {
    board: &'a Board,
    constants: &'a GameConstants,
    params: TurnParams,
    claimed: HashSet<Point>,
    ship_count: usize,
    shipyard_count: usize,
    halite: u32,
    actions: ActionMap,
    decisions: Vec<ShipDecision>,
    spawns: usize,
}

impl<'a> TurnPlan<'a> {
    fn new(board: &'a Board, constants: &'a GameConstants, tuning: &Tuning) -> Self {
        let me = board.me();
        TurnPlan {
            board,
            constants,
            params: TurnParams::compute(board, constants, tuning),
            claimed: board.my_ships().map(|s| s.position).collect(),
            ship_count: me.ships.len(),
            shipyard_count: me.shipyards.len(),
            halite: me.halite,
            actions: ActionMap::new(),
            decisions: Vec::with_capacity(me.ships.len()),
            spawns: 0,
        }
    }

    fn finish(self) -> TurnReport {
        TurnReport {
            actions: self.actions,
            ships: self.decisions,
            spawns: self.spawns,
            params: self.params,
            halite_left: self.halite,
        }
    }

    fn neighbor(&self, point: Point, dir: Direction) -> Point {
        point.translate(dir, self.board.size)
    }

    fn is_hostile(&self, owner: PlayerId) -> bool {
        owner != self.board.current_player
    }

    /// Whether one of our ships may end the turn on `point`.
    fn is_clear(&self, point: Point) -> bool {
        if self
            .board
            .ship_at(point)
            .is_some_and(|s| self.is_hostile(s.owner))
        {
            return false;
        }
        if self
            .board
            .shipyard_at(point)
            .is_some_and(|y| self.is_hostile(y.owner))
        {
            return false;
        }
        !self.claimed.contains(&point)
    }

    /// Whether a hostile ship next to `point` carries no more than `cargo`
    /// and so would win a collision there.
    fn threatened(&self, point: Point, cargo: u32) -> bool {
        ALL_DIRECTIONS.iter().any(|&dir| {
            self.board
                .ship_at(self.neighbor(point, dir))
                .is_some_and(|s| self.is_hostile(s.owner) && s.halite <= cargo)
        })
    }

    fn spawn(&mut self, yard: &Shipyard) {
        self.actions.insert(yard.id.to_string(), Action::Spawn);
        self.halite = self.halite.saturating_sub(self.constants.spawn_cost);
        self.ship_count += 1;
        self.spawns += 1;
        self.claimed.insert(yard.position);
    }

    /// The host pays for a conversion from the ship's cargo first and the
    /// bank second, so the cargo is credited before the cost is debited.
    fn convert(&mut self, ship: &Ship) {
        self.actions.insert(ship.id.to_string(), Action::Convert);
        self.halite = self
            .halite
            .saturating_add(ship.halite)
            .saturating_sub(self.constants.convert_cost);
        self.ship_count = self.ship_count.saturating_sub(1);
        self.shipyard_count += 1;
        self.claimed.remove(&ship.position);
    }

    fn move_ship(&mut self, ship: &Ship, dir: Option<Direction>) {
        match dir {
            Some(dir) => {
                self.actions.insert(ship.id.to_string(), Action::from(dir));
                self.claimed.remove(&ship.position);
                let dest = self.neighbor(ship.position, dir);
                self.claimed.insert(dest);
            }
            None => {
                self.actions.remove(ship.id.as_str());
            }
        }
    }

    fn decide_ship(&mut self, ship: &Ship, rng: &mut impl Rng) {
        let choice = match SHIP_TACTICS
            .iter()
            .copied()
            .find(|&tactic| self.try_tactic(tactic, ship))
        {
            Some(tactic) => Choice::Tactic(tactic),
            None => {
                self.fallback(ship, rng);
                Choice::Fallback
            }
        };
        debug!(
            ship = %ship.id,
            choice = choice.name(),
            action = ?self.actions.get(ship.id.as_str()),
            "ship order"
        );
        self.decisions.push(ShipDecision {
            ship: ship.id.to_string(),
            choice,
        });
    }

    fn decide_shipyard(&mut self, yard: &Shipyard) {
        if self.ship_count < self.params.max_ships
            && self.halite >= self.constants.spawn_cost
            && !self.params.final_step
            && self.is_clear(yard.position)
        {
            debug!(shipyard = %yard.id, "spawn");
            self.spawn(yard);
        }
    }

    fn try_tactic(&mut self, tactic: ShipTactic, ship: &Ship) -> bool {
        match tactic {
            ShipTactic::Endgame => self.endgame(ship),
            ShipTactic::FoundShipyard => self.found_shipyard(ship),
            ShipTactic::Harvest => self.harvest(ship),
            ShipTactic::SeekHalite => self.seek_halite(ship),
            ShipTactic::Unload => self.unload(ship),
            ShipTactic::Patrol => self.patrol(ship),
            ShipTactic::SafetyConvert => self.safety_convert(ship),
            ShipTactic::CrashShipyard => self.crash_shipyard(ship),
        }
    }

    fn endgame(&mut self, ship: &Ship) -> bool {
        if self.params.final_step && ship.halite >= self.constants.convert_cost {
            self.convert(ship);
            return true;
        }
        false
    }

    fn found_shipyard(&mut self, ship: &Ship) -> bool {
        if self.shipyard_count == 0
            && self.ship_count < self.params.max_ships
            && self.params.early_game
            && self.halite.saturating_add(ship.halite) >= self.params.convert_threshold
            && !self.threatened(ship.position, ship.halite)
        {
            self.convert(ship);
            return true;
        }
        false
    }

    fn harvest(&mut self, ship: &Ship) -> bool {
        if self.board.cell(ship.position).halite > f64::from(self.params.low_halite)
            && !self.threatened(ship.position, ship.halite)
        {
            self.move_ship(ship, None);
            return true;
        }
        false
    }

    fn seek_halite(&mut self, ship: &Ship) -> bool {
        let low = f64::from(self.params.low_halite);
        let mut best: Option<(Direction, f64)> = None;
        for dir in ALL_DIRECTIONS {
            let dest = self.neighbor(ship.position, dir);
            let halite = self.board.cell(dest).halite;
            if halite <= low || !self.is_clear(dest) || self.threatened(dest, ship.halite) {
                continue;
            }
            // First direction wins ties.
            if best.map_or(true, |(_, h)| halite > h) {
                best = Some((dir, halite));
            }
        }
        match best {
            Some((dir, _)) => {
                self.move_ship(ship, Some(dir));
                true
            }
            None => false,
        }
    }

    fn unload(&mut self, ship: &Ship) -> bool {
        if ship.halite == 0 {
            return false;
        }
        for dir in ALL_DIRECTIONS {
            let dest = self.neighbor(ship.position, dir);
            if self.board.shipyard_at(dest).is_some() && self.is_clear(dest) {
                self.move_ship(ship, Some(dir));
                return true;
            }
        }
        false
    }

    fn patrol(&mut self, ship: &Ship) -> bool {
        let loop_idx = (ship.id.serial() % MOVEMENT_TACTICS.len() as u64) as usize;
        let order = MOVEMENT_TACTICS[loop_idx];
        let start = (self.board.step as usize / self.board.size) % order.len();
        for k in 0..order.len() {
            let dir = order[(start + k) % order.len()];
            let dest = self.neighbor(ship.position, dir);
            if self.is_clear(dest) && !self.threatened(dest, ship.halite) {
                self.move_ship(ship, Some(dir));
                return true;
            }
        }
        false
    }

    fn safety_convert(&mut self, ship: &Ship) -> bool {
        if self.board.shipyard_at(ship.position).is_none()
            && self.threatened(ship.position, ship.halite)
            && ship.halite >= self.constants.convert_cost
        {
            self.convert(ship);
            return true;
        }
        false
    }

    fn crash_shipyard(&mut self, ship: &Ship) -> bool {
        for dir in ALL_DIRECTIONS {
            let dest = self.neighbor(ship.position, dir);
            let hostile_yard = self
                .board
                .shipyard_at(dest)
                .is_some_and(|y| self.is_hostile(y.owner));
            if hostile_yard && !self.claimed.contains(&dest) {
                self.move_ship(ship, Some(dir));
                return true;
            }
        }
        false
    }

    /// Stays or moves at random, never onto a cell another of our units
    /// has claimed.
    fn fallback(&mut self, ship: &Ship, rng: &mut impl Rng) {
        let mut options: Vec<Option<Direction>> = vec![None];
        for dir in ALL_DIRECTIONS {
            if !self.claimed.contains(&self.neighbor(ship.position, dir)) {
                options.push(Some(dir));
            }
        }
        let pick = options[rng.gen_range(0..options.len())];
        self.move_ship(ship, pick);
    }
}
