//! Shared geometry, constants, and the event vocabulary for Harvest & Tax.
//!
//! This is the type contract. Every domain module imports from here.
//! No core domain imports from the Bevy host modules.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::economy::format_money;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Reference simulation rate (ticks per second).
pub const TICK_RATE_HZ: f64 = 30.0;

pub const AGENT_SIZE: f32 = 40.0;
/// World units moved per tick along each axis of the move intent.
pub const AGENT_SPEED: f32 = 5.0;

pub const CROP_SIZE: f32 = 50.0;
/// Seconds between planting and the crop becoming harvestable.
pub const GROWTH_DURATION: f64 = 3.0;
/// Crops never spawn closer than this to the field edge.
pub const CROP_SPAWN_INSET: f32 = 10.0;

pub const STARTING_MONEY: u32 = 50;
pub const STARTING_SEEDS: u32 = 5;
pub const HARVEST_REWARD: u32 = 30;
pub const SEED_PRICE: u32 = 20;
pub const SEEDS_PER_PURCHASE: u32 = 1;
pub const TAX_AMOUNT: u32 = 10;

pub const ZONE_SIZE: f32 = 100.0;
pub const SHOP_POSITION: (f32, f32) = (10.0, 10.0);
pub const TAX_OFFICE_POSITION: (f32, f32) = (820.0, 10.0);

// ═══════════════════════════════════════════════════════════════════════
// GEOMETRY
// ═══════════════════════════════════════════════════════════════════════

/// Axis-aligned rectangle in screen space (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Half-open point test: the left/top edges are inside, right/bottom are not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.w
            && point.y >= self.y
            && point.y < self.y + self.h
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Everything an interaction can produce. Failures are ordinary outcomes,
/// not errors: the simulation keeps running regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    Planted { seeds_left: u32 },
    PlantDenied,
    Harvested { reward: u32, money: u32 },
    NotReady,
    NoTarget,
    Bought { quantity: u32, cost: u32, seeds: u32, money: u32 },
    BuyDenied,
    TaxPaid { amount: u32, money: u32, tax_paid_count: u32 },
    TaxDenied,
}

impl SimEvent {
    /// Whether this outcome is a refusal the player should notice.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            SimEvent::PlantDenied | SimEvent::BuyDenied | SimEvent::TaxDenied
        )
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Planted { seeds_left } => {
                write!(f, "Planted a crop! Seeds left: {}", seeds_left)
            }
            SimEvent::PlantDenied => write!(f, "No seeds left to plant!"),
            SimEvent::Harvested { money, .. } => {
                write!(f, "Harvested a crop! Money: {}", format_money(*money))
            }
            SimEvent::NotReady => write!(f, "This crop is still growing."),
            SimEvent::NoTarget => write!(f, "Nothing to interact with here."),
            SimEvent::Bought { seeds, money, .. } => write!(
                f,
                "Bought seeds! Seeds left: {}, Money: {}",
                seeds,
                format_money(*money)
            ),
            SimEvent::BuyDenied => write!(f, "Not enough money to buy seeds!"),
            SimEvent::TaxPaid {
                money,
                tax_paid_count,
                ..
            } => write!(
                f,
                "Paid taxes! Money: {}, Taxes Paid: {}",
                format_money(*money),
                tax_paid_count
            ),
            SimEvent::TaxDenied => write!(f, "Not enough money to pay taxes!"),
        }
    }
}
