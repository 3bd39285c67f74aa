//! Swarm -- a rule-based Halite agent.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=swarm=debug`
//! to see every ship's order.

use std::io::{self, BufRead};

use swarm::engine::Engine;
use swarm::protocol::parser::{parse_command, Command};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.new_game(),
            Command::Configuration { json } => {
                if let Err(e) = engine.set_configuration(&json) {
                    error!("configuration: {}", e);
                }
            }
            Command::Observation { json } => {
                if let Err(e) = engine.set_observation(&json) {
                    error!("observation: {}", e);
                }
            }
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
