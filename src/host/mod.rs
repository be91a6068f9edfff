//! Bevy host — owns the one `Simulation`, feeds it intents at a fixed rate,
//! and republishes its outcomes as ECS events and resources.
//!
//! The simulation core knows nothing about Bevy; everything engine-specific
//! lives here.

use bevy::prelude::*;
use std::path::Path;

use crate::config::{load_config, SimConfig, DEFAULT_CONFIG_PATH};
use crate::economy::stats::{track_economy_stats, EconomyStats};
use crate::input::PlayerIntent;
use crate::shared::*;
use crate::simulation::{SimSnapshot, Simulation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

/// Where the simulation's configuration comes from.
#[derive(Resource, Debug, Clone)]
pub enum ConfigSource {
    File(String),
    Inline(SimConfig),
}

impl Default for ConfigSource {
    fn default() -> Self {
        ConfigSource::File(DEFAULT_CONFIG_PATH.to_string())
    }
}

#[derive(Resource)]
pub struct SimulationRes(pub Simulation);

/// The snapshot produced by the most recent tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestSnapshot(pub SimSnapshot);

/// One simulation outcome, in tick order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimEventMessage(pub SimEvent);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<ConfigSource>()
            .init_resource::<PlayerIntent>()
            .init_resource::<LatestSnapshot>()
            .init_resource::<EconomyStats>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_event::<SimEventMessage>()
            .add_systems(OnEnter(GameState::Loading), load_simulation)
            .add_systems(
                FixedUpdate,
                run_simulation_tick.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (log_sim_events, track_economy_stats, dump_snapshot_json)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Resolve the config (falling back to defaults), build the simulation, and
/// start playing.
pub fn load_simulation(
    mut commands: Commands,
    source: Res<ConfigSource>,
    mut fixed_time: ResMut<Time<Fixed>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let config = resolve_config(&source);
    fixed_time.set_timestep_hz(config.tick_rate_hz);

    let sim = Simulation::new(&config);
    info!(
        "[Sim] Ready: {} crop(s), {} money, {} seeds, {} Hz",
        sim.field().crops().len(),
        sim.economy().money,
        sim.economy().seeds,
        config.tick_rate_hz
    );
    for zone in [sim.shop(), sim.tax_office()] {
        info!(
            "[Sim] {} at ({}, {})",
            zone.name(),
            zone.bounds.x,
            zone.bounds.y
        );
    }
    commands.insert_resource(LatestSnapshot(sim.snapshot()));
    commands.insert_resource(SimulationRes(sim));
    next_state.set(GameState::Playing);
}

fn resolve_config(source: &ConfigSource) -> SimConfig {
    match source {
        ConfigSource::Inline(config) => match config.validate() {
            Ok(()) => config.clone(),
            Err(e) => {
                warn!("[Config] Inline config rejected ({}). Using defaults.", e);
                SimConfig::default()
            }
        },
        ConfigSource::File(path) => {
            if !Path::new(path).exists() {
                info!("[Config] No config at {}, using defaults.", path);
                return SimConfig::default();
            }
            match load_config(path) {
                Ok(config) => {
                    info!("[Config] Loaded {}", path);
                    config
                }
                Err(e) => {
                    warn!("[Config] {}. Using defaults.", e);
                    SimConfig::default()
                }
            }
        }
    }
}

/// One fixed step: hand the current intents and the fixed delta to the core.
pub fn run_simulation_tick(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    mut sim: ResMut<SimulationRes>,
    mut latest: ResMut<LatestSnapshot>,
    mut events: EventWriter<SimEventMessage>,
) {
    let outcome = sim.0.tick(intent.tick_input(), time.delta_secs());
    for ev in outcome.events {
        events.send(SimEventMessage(ev));
    }
    latest.0 = outcome.snapshot;
}

pub fn log_sim_events(mut events: EventReader<SimEventMessage>) {
    for SimEventMessage(ev) in events.read() {
        match ev {
            SimEvent::NoTarget | SimEvent::NotReady => debug!("[Sim] {}", ev),
            _ if ev.is_denial() => warn!("[Sim] {}", ev),
            _ => info!("[Sim] {}", ev),
        }
    }
}

pub fn dump_snapshot_json(intent: Res<PlayerIntent>, latest: Res<LatestSnapshot>) {
    if !intent.dump_snapshot {
        return;
    }
    match latest.0.to_json() {
        Ok(json) => info!("[Sim] Snapshot: {}", json),
        Err(e) => warn!("[Sim] {}", e),
    }
}
