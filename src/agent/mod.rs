//! Turn planning.
//!
//! Turns a board snapshot into orders for every unit the current player
//! owns.

pub mod swarm;

pub use swarm::{
    plan_turn, Choice, ShipDecision, ShipTactic, TurnParams, TurnReport, MOVEMENT_TACTICS,
    SHIP_TACTICS,
};
