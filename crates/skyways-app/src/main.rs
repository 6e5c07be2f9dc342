//! SKYWAYS console runner.
//!
//! Loads `config.json` (creating it with defaults when absent), starts the
//! game loop, and reads one JSON `SimCommand` per line from stdin, e.g.
//! `{"type":"SetTimeScale","scale":4.0}`. `quit` or end of input stops it.

use std::io::{self, BufRead};

use skyways_app::control;
use skyways_app::core::commands::SimCommand;
use skyways_app::core::config::{default_config_path, SimConfig};
use skyways_app::state::AppState;

fn main() {
    env_logger::init();

    let config = SimConfig::load_or_create(&default_config_path());
    let state = AppState::new();
    if let Err(e) = control::start_simulation(&state, config) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        match serde_json::from_str::<SimCommand>(line) {
            Ok(command) => {
                if let Err(e) = control::send_command(&state, command) {
                    log::error!("{}", e);
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring unrecognized command {:?}: {}", line, e),
        }
    }

    if let Ok(Some(snapshot)) = control::get_snapshot(&state) {
        log::info!(
            "Final: {} ticks, {} spawned, {} landed, {} collided",
            snapshot.time.tick,
            snapshot.stats.spawned,
            snapshot.stats.landed,
            snapshot.stats.collided
        );
    }
    if let Err(e) = control::stop_simulation(&state) {
        log::error!("{}", e);
    }
}
