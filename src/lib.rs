//! Swarm agent library.
//!
//! Exposes the board representation, the host protocol, the turn planner,
//! and the engine state used by the binaries and integration tests.

pub mod agent;
pub mod board;
pub mod config;
pub mod engine;
pub mod protocol;
