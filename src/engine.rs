//! Engine state management.
//!
//! Holds the memoized game constants, the latest observation, engine options
//! and the random number generator between commands, and plans a turn for
//! the `go` command.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::agent::{plan_turn, Choice, TurnReport};
use crate::config::{GameConstants, Tuning, TUNING_OPTIONS};
use crate::protocol::{
    build_board, format_actions, parse_configuration, parse_observation, Observation,
    ObservationError,
};

/// Reasons the engine cannot plan a turn.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no configuration received")]
    NoConfiguration,

    #[error("no observation received")]
    NoObservation,

    #[error(transparent)]
    Observation(#[from] ObservationError),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    /// Captured from the first configuration of a game and kept until `newgame`.
    pub constants: Option<GameConstants>,
    pub observation: Option<Observation>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with no game state, seeded from entropy.
    pub fn new() -> Self {
        Engine {
            constants: None,
            observation: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an engine whose random fallback moves are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Engine {
            rng: SmallRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Forgets the constants and observation of the previous game.
    pub fn new_game(&mut self) {
        self.constants = None;
        self.observation = None;
    }

    /// Sets an engine option. `Seed` reseeds the generator immediately;
    /// 0 means entropy.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        if name == "Seed" {
            match value.parse::<u64>() {
                Ok(0) => self.rng = SmallRng::from_entropy(),
                Ok(seed) => self.rng = SmallRng::seed_from_u64(seed),
                Err(_) => warn!(value = %value, "ignoring non-numeric seed"),
            }
        }
        self.options.insert(name, value);
    }

    /// Tuning knobs with option overrides applied.
    pub fn tuning(&self) -> Tuning {
        Tuning::from_options(&self.options)
    }

    /// Parses and memoizes a host configuration.
    pub fn set_configuration(&mut self, json: &str) -> Result<(), EngineError> {
        let constants = parse_configuration(json)?.constants()?;
        self.configure(constants);
        Ok(())
    }

    /// Memoizes the game constants. The first configuration of a game wins;
    /// later ones are ignored until `new_game`.
    pub fn configure(&mut self, constants: GameConstants) {
        match self.constants {
            Some(existing) if existing != constants => {
                warn!(?existing, ?constants, "configuration already fixed for this game");
            }
            Some(_) => {}
            None => {
                info!(
                    size = constants.size,
                    episode_steps = constants.episode_steps,
                    "game constants fixed"
                );
                self.constants = Some(constants);
            }
        }
    }

    /// Parses and stores the observation for the next `go`.
    pub fn set_observation(&mut self, json: &str) -> Result<(), EngineError> {
        let obs = parse_observation(json)?;
        self.observe(obs);
        Ok(())
    }

    pub fn observe(&mut self, obs: Observation) {
        self.observation = Some(obs);
    }

    /// Plans the current turn.
    pub fn decide(&mut self) -> Result<TurnReport, EngineError> {
        let tuning = self.tuning();
        let constants = self.constants.ok_or(EngineError::NoConfiguration)?;
        let obs = self.observation.as_ref().ok_or(EngineError::NoObservation)?;
        let board = build_board(obs, constants.size)?;
        Ok(plan_turn(&board, &constants, &tuning, &mut self.rng))
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name swarm")?;
        writeln!(out, "id author halite-swarm")?;
        writeln!(
            out,
            "option name Seed type spin default 0 min 0 max {}",
            u64::MAX
        )?;
        for (name, default) in TUNING_OPTIONS {
            writeln!(
                out,
                "option name {} type spin default {} min 0 max {}",
                name,
                default,
                u32::MAX
            )?;
        }
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `go` command: an `info` summary line followed by the
    /// action map. Planning failures are logged and produce no output.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let report = match self.decide() {
            Ok(r) => r,
            Err(e) => {
                error!("go: {}", e);
                return Ok(());
            }
        };

        let step = self.observation.as_ref().map_or(0, |o| o.step);
        writeln!(
            out,
            "info step {} ships {} spawns {} fallbacks {} halite {} low_halite {} max_ships {}",
            step,
            report.ships.len(),
            report.spawns,
            report.count(Choice::Fallback),
            report.halite_left,
            report.params.low_halite,
            report.params.max_ships
        )?;
        writeln!(out, "actions {}", format_actions(&report.actions)?)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Action, ActionMap};
    use serde_json::json;

    const CONFIG: &str = r#"{"episodeSteps": 400, "size": 5, "convertCost": 500, "spawnCost": 500}"#;

    fn observation(step: u32, bank: u32) -> String {
        let mut halite = vec![0.0; 25];
        halite[7] = 120.0;
        json!({
            "step": step,
            "halite": halite,
            "players": [
                [bank, {"0-9": 12}, {"0-1": [12, 0], "0-2": [2, 30]}],
                [5000, {}, {"0-3": [24, 0]}]
            ],
            "player": 0
        })
        .to_string()
    }

    fn ready_engine() -> Engine {
        let mut engine = Engine::with_seed(11);
        engine.set_configuration(CONFIG).unwrap();
        engine.set_observation(&observation(5, 1000)).unwrap();
        engine
    }

    fn actions_line(output: &str) -> &str {
        output
            .lines()
            .find(|l| l.starts_with("actions "))
            .and_then(|l| l.strip_prefix("actions "))
            .unwrap()
    }

    #[test]
    fn new_engine_has_no_state() {
        let engine = Engine::new();
        assert!(engine.constants.is_none());
        assert!(engine.observation.is_none());
        assert!(engine.options.is_empty());
    }

    #[test]
    fn first_configuration_is_memoized() {
        let mut engine = Engine::new();
        engine.set_configuration(CONFIG).unwrap();
        engine
            .set_configuration(r#"{"episodeSteps": 10, "size": 9, "convertCost": 1, "spawnCost": 1}"#)
            .unwrap();
        let constants = engine.constants.unwrap();
        assert_eq!(constants.size, 5);
        assert_eq!(constants.episode_steps, 400);
    }

    #[test]
    fn new_game_resets_state() {
        let mut engine = ready_engine();
        engine.new_game();
        assert!(engine.constants.is_none());
        assert!(engine.observation.is_none());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut engine = Engine::new();
        assert!(engine.set_configuration("garbage").is_err());
        assert!(engine.constants.is_none());
    }

    #[test]
    fn decide_requires_configuration_and_observation() {
        let mut engine = Engine::new();
        assert!(matches!(engine.decide(), Err(EngineError::NoConfiguration)));
        engine.set_configuration(CONFIG).unwrap();
        assert!(matches!(engine.decide(), Err(EngineError::NoObservation)));
    }

    #[test]
    fn observation_must_match_board_size() {
        let mut engine = Engine::new();
        engine
            .set_configuration(r#"{"episodeSteps": 400, "size": 6, "convertCost": 500, "spawnCost": 500}"#)
            .unwrap();
        engine.set_observation(&observation(0, 0)).unwrap();
        assert!(matches!(
            engine.decide(),
            Err(EngineError::Observation(ObservationError::HaliteLength { .. }))
        ));
    }

    #[test]
    fn set_option_stores_value() {
        let mut engine = Engine::new();
        engine.set_option("MinShips".to_string(), Some("3".to_string()));
        assert_eq!(engine.options.get("MinShips"), Some(&"3".to_string()));
        assert_eq!(engine.tuning().min_ships, 3);
    }

    #[test]
    fn seed_option_makes_turns_reproducible() {
        let mut a = ready_engine();
        let mut b = ready_engine();
        a.set_option("Seed".to_string(), Some("99".to_string()));
        b.set_option("Seed".to_string(), Some("99".to_string()));
        for _ in 0..5 {
            assert_eq!(a.decide().unwrap().actions, b.decide().unwrap().actions);
        }
    }

    #[test]
    fn handle_go_outputs_info_then_actions() {
        let mut engine = ready_engine();
        let mut output = Vec::new();
        engine.handle_go(&mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("info step 5 ships 2 "));

        let actions: ActionMap = serde_json::from_str(actions_line(&output)).unwrap();
        // The yard is occupied by ship 0-1 unless it leaves, so at most one spawn.
        assert!(actions.values().filter(|a| **a == Action::Spawn).count() <= 1);
        assert!(actions.keys().all(|id| ["0-1", "0-2", "0-9"].contains(&id.as_str())));
    }

    #[test]
    fn handle_go_without_observation_is_silent() {
        let mut engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_go(&mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn handle_hello_outputs_handshake() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_hello(&mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("id name swarm"));
        assert!(output.contains("id author halite-swarm"));
        assert!(output.contains("option name MinShips type spin default 10"));
        assert!(output.contains("protocol_version 1"));
        assert_eq!(output.lines().last(), Some("hellook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_isready(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "readyok");
    }
}
