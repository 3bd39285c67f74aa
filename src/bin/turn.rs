//! One-shot turn CLI.
//!
//! Reads a single `{"observation": ..., "configuration": ...}` document and
//! prints the action map as JSON, for hosts that call the agent once per turn.
//!
//! Usage:
//!   turn [OPTIONS] < turn.json
//!
//! Options:
//!   --input FILE  Read the turn document from FILE instead of stdin
//!   --seed N      Random seed, 0 for entropy (default: 0)

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use swarm::engine::Engine;
use swarm::protocol::{format_actions, parse_turn};
use tracing::error;
use tracing_subscriber::EnvFilter;

struct Cli {
    input: Option<String>,
    seed: u64,
}

fn parse_args() -> Result<Option<Cli>, String> {
    let mut args = env::args().skip(1);
    let mut cli = Cli {
        input: None,
        seed: 0,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                cli.input = Some(args.next().ok_or("--input requires a file path")?);
            }
            "--seed" => {
                let value = args.next().ok_or("--seed requires a number")?;
                cli.seed = value
                    .parse()
                    .map_err(|_| format!("invalid --seed value: {}", value))?;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(Some(cli))
}

fn run(cli: &Cli) -> Result<String, String> {
    let text = match &cli.input {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("stdin: {}", e))?;
            buf
        }
    };

    let doc = parse_turn(&text).map_err(|e| e.to_string())?;
    let constants = doc.configuration.constants().map_err(|e| e.to_string())?;

    let mut engine = if cli.seed == 0 {
        Engine::new()
    } else {
        Engine::with_seed(cli.seed)
    };
    engine.configure(constants);
    engine.observe(doc.observation);
    let report = engine.decide().map_err(|e| e.to_string())?;
    format_actions(&report.actions).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = match parse_args() {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(json) => {
            let mut out = io::stdout().lock();
            if writeln!(out, "{}", json).and_then(|_| out.flush()).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: turn [OPTIONS] < turn.json");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input FILE  Read the turn document from FILE instead of stdin");
    eprintln!("  --seed N      Random seed, 0 for entropy (default: 0)");
    eprintln!("  --help        Show this help");
}
