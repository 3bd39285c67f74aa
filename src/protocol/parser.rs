//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that the
//! engine main loop can dispatch on. JSON payloads run to the end of the line
//! and are handed over verbatim.

use tracing::warn;

/// A parsed host-to-agent command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; agent must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Forget everything about the previous game.
    NewGame,

    /// Game configuration as a JSON object.
    Configuration { json: String },

    /// Turn observation as a JSON object.
    Observation { json: String },

    /// Decide orders for the stored observation.
    Go,

    /// Terminate the agent process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((k, r)) => (k, r.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(rest),
        "configuration" => payload(keyword, rest).map(|json| Command::Configuration { json }),
        "observation" => payload(keyword, rest).map(|json| Command::Observation { json }),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(rest: &str) -> Option<Command> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 2 || tokens[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&tokens[1..vi], &tokens[vi + 1..]),
        None => (&tokens[1..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

fn payload(keyword: &str, rest: &str) -> Option<String> {
    if rest.is_empty() {
        warn!("malformed {keyword}: expected '{keyword} <json>'");
        return None;
    }
    Some(rest.to_string())
}
