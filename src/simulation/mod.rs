//! The orchestrator: one `tick` moves the farmer, advances crop timers, and
//! resolves an interact press against the field, the shop, and the tax office.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SimClock, Timestamp};
use crate::config::SimConfig;
use crate::economy::Economy;
use crate::farming::CropField;
use crate::shared::*;
use crate::zones::InteractionZone;

mod snapshot;

pub use snapshot::{CropView, SimSnapshot};

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Per-axis direction, each component in {-1, 0, 1}. Screen space: +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub dx: i8,
    pub dy: i8,
}

impl MoveIntent {
    pub const NONE: MoveIntent = MoveIntent { dx: 0, dy: 0 };

    /// Out-of-range components are clamped into {-1, 0, 1}.
    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub move_intent: MoveIntent,
    pub interact: bool,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn interact() -> Self {
        Self {
            move_intent: MoveIntent::NONE,
            interact: true,
        }
    }

    pub fn moving(dx: i8, dy: i8) -> Self {
        Self {
            move_intent: MoveIntent::new(dx, dy),
            interact: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// AGENT
// ═══════════════════════════════════════════════════════════════════════

/// The farmer. Movement is instantaneous per tick and unconstrained: the
/// agent may walk over zones and off the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub speed: f32,
}

impl Agent {
    pub fn new(position: Vec2, speed: f32) -> Self {
        Self { position, speed }
    }

    pub fn apply(&mut self, intent: MoveIntent) {
        if intent.is_idle() {
            return;
        }
        self.position.x += intent.dx as f32 * self.speed;
        self.position.y += intent.dy as f32 * self.speed;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.position, Vec2::splat(AGENT_SIZE))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SIMULATION
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// In resolution order: crop, then shop, then tax office.
    pub events: Vec<SimEvent>,
    pub snapshot: SimSnapshot,
}

pub struct Simulation<C: Clock = SimClock> {
    agent: Agent,
    economy: Economy,
    field: CropField,
    shop: InteractionZone,
    tax_office: InteractionZone,
    clock: C,
    tick_count: u64,
}

impl Simulation<SimClock> {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_clock(config, SimClock::new())
    }
}

impl<C: Clock> Simulation<C> {
    pub fn with_clock(config: &SimConfig, clock: C) -> Self {
        let field = CropField::new(config.field, config.initial_crops, config.rng_seed)
            .with_growth_duration(config.growth_duration);
        Self::from_parts(config, field, clock)
    }

    /// Assemble a simulation around a pre-built field.
    pub fn from_parts(config: &SimConfig, field: CropField, clock: C) -> Self {
        let (sx, sy) = config.agent_start();
        Self {
            agent: Agent::new(Vec2::new(sx, sy), config.agent_speed),
            economy: Economy::new(config.starting_money, config.starting_seeds)
                .with_harvest_reward(config.harvest_reward),
            field,
            shop: InteractionZone::shop(config.shop, config.seed_price, config.seeds_per_purchase),
            tax_office: InteractionZone::tax_office(config.tax_office, config.tax_amount),
            clock,
            tick_count: 0,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn field(&self) -> &CropField {
        &self.field
    }

    pub fn shop(&self) -> &InteractionZone {
        &self.shop
    }

    pub fn tax_office(&self) -> &InteractionZone {
        &self.tax_office
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advance one step. The clock is read once, after it absorbs `dt`, and
    /// that instant is used for every timer check in this tick.
    pub fn tick(&mut self, input: TickInput, dt: f32) -> TickOutcome {
        self.clock.advance(dt);
        let now = self.clock.now();
        self.tick_count = self.tick_count.saturating_add(1);

        self.agent.apply(input.move_intent);
        self.field.advance(now);

        let mut events = Vec::new();
        if input.interact {
            let point = self.agent.position;
            events.push(self.field.try_interact(point, now, &mut self.economy));
            // Both zones are tried on every press; one press may trigger several effects.
            for zone in [&self.shop, &self.tax_office] {
                if let Some(ev) = zone.try_interact(point, &mut self.economy) {
                    events.push(ev);
                }
            }
        }

        TickOutcome {
            events,
            snapshot: self.snapshot(),
        }
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick: self.tick_count,
            time: self.clock.now().secs(),
            agent_x: self.agent.position.x,
            agent_y: self.agent.position.y,
            money: self.economy.money,
            seeds: self.economy.seeds,
            harvest_count: self.economy.harvest_count,
            tax_paid_count: self.economy.tax_paid_count,
            tax_streak: self.economy.tax_streak,
            crops: self
                .field
                .crops()
                .iter()
                .map(|c| CropView {
                    x: c.bounds.x,
                    y: c.bounds.y,
                    stage: c.growth_stage,
                })
                .collect(),
        }
    }

    pub fn ready_crops(&self) -> usize {
        self.field.ready_count()
    }
}
