//! Host observation and configuration documents.
//!
//! The host describes each turn as JSON. An observation lists the flat
//! halite grid and, per player, `[bank, {shipyard_id: index}, {ship_id:
//! [index, cargo]}]`. The configuration carries the game constants.
//! Unknown fields are ignored in both.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::board::{Board, Point, UnitId};
use crate::config::GameConstants;

/// Errors raised while decoding or validating host documents.
#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board size must be positive")]
    ZeroSize,

    #[error("expected {expected} halite cells, got {found}")]
    HaliteLength { expected: usize, found: usize },

    #[error("current player {player} not among {players} players")]
    UnknownPlayer { player: usize, players: usize },

    #[error("unit '{id}' at cell {index} is off the board")]
    PositionOutOfRange { id: String, index: usize },

    #[error("unit '{id}' collides with another unit at cell {index}")]
    Occupied { id: String, index: usize },
}

/// Game configuration as sent by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub episode_steps: u32,
    pub size: usize,
    pub convert_cost: u32,
    pub spawn_cost: u32,
}

impl Configuration {
    /// Extracts the constants the agent needs.
    pub fn constants(&self) -> Result<GameConstants, ObservationError> {
        if self.size == 0 {
            return Err(ObservationError::ZeroSize);
        }
        Ok(GameConstants {
            size: self.size,
            episode_steps: self.episode_steps,
            convert_cost: self.convert_cost,
            spawn_cost: self.spawn_cost,
        })
    }
}

/// One player's entry: bank, shipyards by id, ships by id.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerObservation(
    pub f64,
    pub BTreeMap<String, usize>,
    pub BTreeMap<String, (usize, f64)>,
);

/// A single turn's snapshot as sent by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub step: u32,
    pub halite: Vec<f64>,
    pub players: Vec<PlayerObservation>,
    pub player: usize,
}

/// A combined document used by one-shot callers.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnDocument {
    pub observation: Observation,
    pub configuration: Configuration,
}

/// Parses a configuration object.
pub fn parse_configuration(json: &str) -> Result<Configuration, ObservationError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses an observation object without validating it against a board size.
pub fn parse_observation(json: &str) -> Result<Observation, ObservationError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a `{"observation": ..., "configuration": ...}` document.
pub fn parse_turn(json: &str) -> Result<TurnDocument, ObservationError> {
    Ok(serde_json::from_str(json)?)
}

/// Host halite amounts arrive as JSON numbers; units hold whole halite.
fn whole_halite(v: f64) -> u32 {
    v.max(0.0) as u32
}

/// Builds a board snapshot from an observation on a board of side `size`.
pub fn build_board(obs: &Observation, size: usize) -> Result<Board, ObservationError> {
    if size == 0 {
        return Err(ObservationError::ZeroSize);
    }
    let cells = size * size;
    if obs.halite.len() != cells {
        return Err(ObservationError::HaliteLength {
            expected: cells,
            found: obs.halite.len(),
        });
    }
    if obs.player >= obs.players.len() {
        return Err(ObservationError::UnknownPlayer {
            player: obs.player,
            players: obs.players.len(),
        });
    }

    let mut board = Board::empty(size, obs.step, obs.players.len(), obs.player);
    for (index, &halite) in obs.halite.iter().enumerate() {
        board.cells[index].halite = halite;
    }

    let locate = |id: &str, index: usize| {
        if index < cells {
            Ok(Point::from_index(index, size))
        } else {
            Err(ObservationError::PositionOutOfRange {
                id: id.to_string(),
                index,
            })
        }
    };

    for (owner, PlayerObservation(bank, shipyards, ships)) in obs.players.iter().enumerate() {
        board.set_player_halite(owner, whole_halite(*bank));
        for (id, &index) in shipyards {
            let point = locate(id, index)?;
            if !board.add_shipyard(UnitId::new(id.as_str()), point, owner) {
                return Err(ObservationError::Occupied {
                    id: id.clone(),
                    index,
                });
            }
        }
        for (id, &(index, cargo)) in ships {
            let point = locate(id, index)?;
            if !board.add_ship(UnitId::new(id.as_str()), point, whole_halite(cargo), owner) {
                return Err(ObservationError::Occupied {
                    id: id.clone(),
                    index,
                });
            }
        }
    }

    Ok(board)
}
