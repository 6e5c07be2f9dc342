//! Game loop thread: runs the simulation engine at the configured tick rate.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via an `mpsc` channel; the latest snapshot is
//! stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use skyways_core::config::SimConfig;
use skyways_core::state::SimSnapshot;
use skyways_sim::SimulationEngine;

use crate::state::GameLoopCommand;

/// Seconds of simulated time between status lines.
const STATUS_INTERVAL_SECS: u64 = 5;

/// Nominal duration of one tick at 1x speed.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / tick_rate.max(1) as u64)
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the control surface to use.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("skyways-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    let tick = tick_duration(config.tick_rate);
    let status_every = STATUS_INTERVAL_SECS * config.tick_rate.max(1) as u64;
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Sim(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::info!("Game loop stopping at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        if snapshot.time.tick > 0 && snapshot.time.tick % status_every == 0 {
            log_status(&snapshot);
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = scaled_tick(tick, engine.time_scale());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            log::warn!("Game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}

/// Wall-clock duration of a tick at `time_scale`. A zero scale idles at 1x.
fn scaled_tick(tick: Duration, time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        tick.div_f64(time_scale)
    } else {
        tick
    }
}

fn log_status(snapshot: &SimSnapshot) {
    log::info!(
        "t={:.1}s flights {}/{} spawned {} landed {} collided {} ({:?})",
        snapshot.time.elapsed_secs,
        snapshot.population.current,
        snapshot.population.max,
        snapshot.stats.spawned,
        snapshot.stats.landed,
        snapshot.stats.collided,
        snapshot.execution_mode
    );
}
