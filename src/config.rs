//! Game constants and tuning knobs.
//!
//! `GameConstants` is captured from the host configuration the first time the
//! engine sees one and is passed by reference into every turn afterwards.
//! `Tuning` holds the hand-picked thresholds of the swarm controller.

use std::collections::HashMap;

/// Per-game constants fixed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConstants {
    pub size: usize,
    pub episode_steps: u32,
    pub convert_cost: u32,
    pub spawn_cost: u32,
}

impl GameConstants {
    /// The last step on which orders still take effect before the game ends.
    /// Episodes shorter than two steps have none.
    pub fn final_step(&self) -> Option<u32> {
        self.episode_steps.checked_sub(2)
    }

    /// Steps before this one belong to the first half of the game.
    pub fn half_time(&self) -> u32 {
        self.episode_steps / 2
    }
}

impl Default for GameConstants {
    /// The host's standard four-player game.
    fn default() -> Self {
        GameConstants {
            size: 21,
            episode_steps: 400,
            convert_cost: 500,
            spawn_cost: 500,
        }
    }
}

/// Option names accepted by `setoption`, with their defaults.
pub const TUNING_OPTIONS: [(&str, u32); 4] = [
    ("MinShips", 10),
    ("ShipCapFactor", 10),
    ("LowHaliteFloor", 4),
    ("ConvertSpawnMultiple", 3),
];

/// Thresholds of the swarm controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// The fleet cap never drops below this many ships.
    pub min_ships: u32,
    /// Ships allowed per unit of average halite per ship on the board.
    pub ship_cap_factor: u32,
    /// Cells at or below this much halite are never worth harvesting.
    pub low_halite_floor: u32,
    /// A first shipyard is founded only with enough halite left for this many spawns.
    pub convert_spawn_multiple: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            min_ships: TUNING_OPTIONS[0].1,
            ship_cap_factor: TUNING_OPTIONS[1].1,
            low_halite_floor: TUNING_OPTIONS[2].1,
            convert_spawn_multiple: TUNING_OPTIONS[3].1,
        }
    }
}

impl Tuning {
    /// Reads overrides from engine options. Missing or unparsable values keep
    /// their defaults.
    pub fn from_options(options: &HashMap<String, String>) -> Self {
        let get = |name: &str, default: u32| {
            options
                .get(name)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(default)
        };
        let defaults = Tuning::default();
        Tuning {
            min_ships: get("MinShips", defaults.min_ships),
            ship_cap_factor: get("ShipCapFactor", defaults.ship_cap_factor),
            low_halite_floor: get("LowHaliteFloor", defaults.low_halite_floor),
            convert_spawn_multiple: get("ConvertSpawnMultiple", defaults.convert_spawn_multiple),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_step_is_two_before_episode_end() {
        let constants = GameConstants::default();
        assert_eq!(constants.final_step(), Some(398));
        assert_eq!(constants.half_time(), 200);
    }

    #[test]
    fn tiny_episodes_have_no_final_step() {
        let constants = GameConstants {
            episode_steps: 1,
            ..GameConstants::default()
        };
        assert_eq!(constants.final_step(), None);

        let two = GameConstants {
            episode_steps: 2,
            ..GameConstants::default()
        };
        assert_eq!(two.final_step(), Some(0));
    }

    #[test]
    fn tuning_defaults() {
        let tuning = Tuning::default();
        assert_eq!(tuning.min_ships, 10);
        assert_eq!(tuning.ship_cap_factor, 10);
        assert_eq!(tuning.low_halite_floor, 4);
        assert_eq!(tuning.convert_spawn_multiple, 3);
    }

    #[test]
    fn tuning_reads_options_and_ignores_garbage() {
        let mut options = HashMap::new();
        options.insert("MinShips".to_string(), "25".to_string());
        options.insert("LowHaliteFloor".to_string(), "lots".to_string());
        let tuning = Tuning::from_options(&options);
        assert_eq!(tuning.min_ships, 25);
        assert_eq!(tuning.low_halite_floor, 4);
        assert_eq!(tuning.ship_cap_factor, 10);
    }
}
