//! Simulation engine: the core of SKYWAYS.
//!
//! `SimulationEngine` owns the hecs ECS world, processes commands, runs all
//! stages under the selected execution strategy, and produces
//! `SimSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyways_core::commands::SimCommand;
use skyways_core::config::SimConfig;
use skyways_core::enums::{ExecutionMode, RunState};
use skyways_core::events::SimEvent;
use skyways_core::state::{FlightStats, PopulationView, SimSnapshot};
use skyways_core::types::{Planet, SimTime};

use crate::execution::Executor;
use crate::physics::PhysicsWorld;
use crate::population::PopulationCounter;
use crate::systems;
use crate::systems::collision::CollisionContext;
use crate::systems::guide_movement::MovementContext;
use crate::systems::snapshot::SnapshotHeader;
use crate::systems::spawner::SpawnContext;
use crate::world_setup::{self, FlightPlan};

/// Upper bound accepted by `SetTimeScale`.
const MAX_TIME_SCALE: f64 = 8.0;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    planet: Planet,
    airports: Vec<Vec3>,
    time: SimTime,
    run_state: RunState,
    time_scale: f64,
    executor: Executor,
    physics: PhysicsWorld,
    population: PopulationCounter,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    stats: FlightStats,
}

impl SimulationEngine {
    /// Create a new engine and place the airports.
    ///
    /// A config that fails `validate` is replaced by the defaults.
    pub fn new(config: SimConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                SimConfig::default()
            }
        };
        let mut world = World::new();
        let planet = Planet::new(Vec3::ZERO, config.planet_radius);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let airports = world_setup::setup_airports(&mut world, &planet, &config, &mut rng);

        log::info!(
            "Simulation engine ready: seed {}, {:?} execution, cap {} flights",
            config.seed,
            config.execution_mode,
            config.max_plane_count
        );

        Self {
            world,
            planet,
            airports,
            time: SimTime::default(),
            run_state: RunState::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            executor: Executor::new(config.execution_mode, config.partition_size),
            physics: PhysicsWorld::from_config(&config),
            population: PopulationCounter::new(config.max_plane_count),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            stats: FlightStats::default(),
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.run_state == RunState::Running {
            self.run_systems();
            self.time.advance(self.config.dt());
        }

        let header = SnapshotHeader {
            time: self.time,
            run_state: self.run_state,
            execution_mode: self.executor.mode,
            population: self.population_view(),
            planet: self.planet,
            stats: self.stats,
        };
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &header, events)
    }

    /// Instantiate a flight immediately, outside the spawner schedule.
    ///
    /// Returns `None` when the population cap is reached. The pair is
    /// marked `JustSpawned` and joins the simulation after the next flush.
    pub fn spawn_flight(&mut self, plan: &FlightPlan) -> Option<(Entity, Entity)> {
        if !self.population.try_reserve() {
            return None;
        }
        self.population.commit();
        self.stats.spawned += 1;
        let (guide, plane) = world_setup::spawn_flight(&mut self.world, plan, self.config.stabilizer);
        self.events.push(SimEvent::FlightSpawned {
            guide: guide.to_bits().get(),
            plane: plane.to_bits().get(),
            origin_airport: plan.origin_airport,
            end_point: plan.path.end_point,
            target_altitude: plan.path.target_altitude,
        });
        Some((guide, plane))
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.executor.mode
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    /// Airport positions by index.
    pub fn airports(&self) -> &[Vec3] {
        &self.airports
    }

    pub fn population(&self) -> &PopulationCounter {
        &self.population
    }

    pub fn stats(&self) -> FlightStats {
        self.stats
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scripted test scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn population_view(&self) -> PopulationView {
        PopulationView {
            current: self.population.current(),
            max: self.population.max(),
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Pause => {
                self.run_state = RunState::Paused;
            }
            SimCommand::Resume => {
                self.run_state = RunState::Running;
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            SimCommand::SetExecutionMode { mode } => {
                if mode != self.executor.mode {
                    log::info!("Execution mode {:?} -> {:?}", self.executor.mode, mode);
                }
                self.executor.mode = mode;
            }
        }
    }

    /// Run all stages in order.
    fn run_systems(&mut self) {
        let elapsed = self.time.elapsed_secs;
        let dt = self.config.dt() as f32;

        // 1. Spawner (reserves population slots, plans departures)
        let mut log = systems::spawner::run(
            &mut self.world,
            &self.executor,
            &SpawnContext {
                elapsed,
                airports: &self.airports,
                planet: self.planet,
                config: &self.config,
                population: &self.population,
            },
        );

        // 2. Physics (tether, rotation integration, overlap events)
        let physics_events = self.physics.step(&mut self.world, &self.planet, dt);

        // 3. Proximity alerts, applied at the barrier so movement sees them
        let alert_log =
            systems::alerts::run(&self.world, &self.executor, &physics_events.triggers);
        log.append(systems::alerts::apply_barrier(&mut self.world, alert_log));

        // 4. Guide movement (avoidance guides first)
        log.append(systems::guide_movement::run(
            &mut self.world,
            &self.executor,
            &MovementContext {
                planet: self.planet,
                params: &self.config.flight,
                dt,
            },
        ));

        // 5. Stabilization
        systems::stabilization::run(&mut self.world, &self.executor, dt);

        // 6. Collision resolution
        let (collision_log, collision_events) = systems::collision::run(
            &self.executor,
            &physics_events.contacts,
            &CollisionContext {
                world: &self.world,
                elapsed,
                despawn_on_collision: self.config.enable_despawn_on_collision,
                spawn_explosions: self.config.enable_explosions,
            },
        );
        log.append(collision_log);
        self.events.extend(collision_events);

        log::trace!(
            "Tick {}: {} triggers, {} contacts, {} mutations",
            self.time.tick,
            physics_events.triggers.len(),
            physics_events.contacts.len(),
            log.len()
        );

        // 7. Flush (apply log, despawn, fix up, instantiate)
        systems::cleanup::flush(
            &mut self.world,
            log,
            &self.population,
            self.config.stabilizer,
            &mut self.events,
            &mut self.stats,
            &mut self.despawn_buffer,
        );

        // 8. Explosion timed despawn
        systems::explosion::run(
            &mut self.world,
            elapsed,
            self.config.explosion_duration,
            &mut self.despawn_buffer,
        );
    }
}
