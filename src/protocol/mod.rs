//! Host protocol handling.
//!
//! Decoding of the host's JSON observation and configuration documents,
//! encoding of the action map, and the line command parser for the main loop.

pub mod actions;
pub mod observation;
pub mod parser;

pub use actions::format_actions;
pub use observation::{
    build_board, parse_configuration, parse_observation, parse_turn, Configuration, Observation,
    ObservationError, PlayerObservation, TurnDocument,
};
pub use parser::{parse_command, Command};
