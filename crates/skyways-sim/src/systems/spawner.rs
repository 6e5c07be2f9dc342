//! Spawner: departs flights from airports whose timer has elapsed.
//!
//! Each eligible airport reserves a population slot before planning its
//! flight, so the cap holds however the airports are partitioned. The
//! reservations are committed once after the pass.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyways_core::components::Airport;
use skyways_core::config::SimConfig;
use skyways_core::types::Planet;

use crate::execution::Executor;
use crate::mutation::{Mutation, MutationLog};
use crate::population::PopulationCounter;
use crate::world_setup::{self, AirportRng};

/// Per-airport work item.
#[derive(Debug, Clone)]
pub struct AirportItem {
    pub entity: Entity,
    pub index: u32,
    pub next_spawn_time: f64,
    pub rng: ChaCha8Rng,
}

/// Read-only state shared by all airports during the pass.
pub struct SpawnContext<'a> {
    pub elapsed: f64,
    /// Airport positions by index.
    pub airports: &'a [Vec3],
    pub planet: Planet,
    pub config: &'a SimConfig,
    pub population: &'a PopulationCounter,
}

/// Run the spawner pass and return the planned departures.
pub fn run(world: &mut World, executor: &Executor, ctx: &SpawnContext) -> MutationLog {
    let mut items: Vec<AirportItem> = world
        .query::<(&Airport, &AirportRng)>()
        .iter()
        .map(|(entity, (airport, rng))| AirportItem {
            entity,
            index: airport.index,
            next_spawn_time: airport.next_spawn_time,
            rng: rng.0.clone(),
        })
        .collect();
    items.sort_by_key(|item| item.index);

    let log = executor.run(&mut items, |item, log| try_depart(item, ctx, log));
    let committed = ctx.population.commit();
    if committed > 0 {
        log::trace!("Reserved {} flight slots", committed);
    }

    for item in items {
        if let Ok((airport, rng)) = world.query_one_mut::<(&mut Airport, &mut AirportRng)>(item.entity) {
            airport.next_spawn_time = item.next_spawn_time;
            rng.0 = item.rng;
        }
    }

    log
}

/// Plan one departure if the airport is due and a slot is free.
pub fn try_depart(item: &mut AirportItem, ctx: &SpawnContext, log: &mut MutationLog) {
    if ctx.elapsed < item.next_spawn_time {
        return;
    }
    let count = ctx.airports.len();
    let origin_index = item.index as usize;
    let Some(&origin) = ctx.airports.get(origin_index) else {
        return;
    };
    if count < 2 || !ctx.population.try_reserve() {
        return;
    }

    let config = ctx.config;
    item.next_spawn_time += item
        .rng
        .gen_range(config.spawn_interval_min..=config.spawn_interval_max);

    let mut destination_index = item.rng.gen_range(0..count - 1);
    if destination_index >= origin_index {
        destination_index += 1;
    }

    let plan = world_setup::plan_flight(
        item.index,
        origin,
        ctx.airports[destination_index],
        &ctx.planet,
        &config.flight,
        &mut item.rng,
    );
    log.push(Mutation::SpawnFlight(plan));
}
