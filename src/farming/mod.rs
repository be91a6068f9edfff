//! Farming domain — crop lifecycle, field placement, and crop interaction.
//!
//! `Seed --plant--> Growing --(elapsed >= growth duration)--> Ready --harvest--> removed`
//!
//! A harvested crop leaves the field and a fresh Seed crop is spawned at a new
//! random position, so the field never runs out of work.

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::shared::*;

mod field;

pub use field::CropField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Seed,
    Growing,
    Ready,
}

impl GrowthStage {
    pub fn label(self) -> &'static str {
        match self {
            GrowthStage::Seed => "seed",
            GrowthStage::Growing => "growing",
            GrowthStage::Ready => "ready",
        }
    }
}

/// A single crop node. Identity is its position; the field never holds two
/// crops it needs to tell apart by anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub bounds: Bounds,
    pub growth_stage: GrowthStage,
    pub planted_at: Option<Timestamp>,
}

impl Crop {
    /// An unplanted crop with its top-left corner at `(x, y)`.
    pub fn seed_at(x: f32, y: f32) -> Self {
        Self {
            bounds: Bounds::new(x, y, CROP_SIZE, CROP_SIZE),
            growth_stage: GrowthStage::Seed,
            planted_at: None,
        }
    }

    fn plant(&mut self, now: Timestamp) {
        self.growth_stage = GrowthStage::Growing;
        self.planted_at = Some(now);
    }

    /// Promote a Growing crop to Ready once enough time has passed.
    /// Returns true if the stage changed.
    pub fn grow(&mut self, now: Timestamp, growth_duration: f64) -> bool {
        if self.growth_stage != GrowthStage::Growing {
            return false;
        }
        let Some(planted_at) = self.planted_at else {
            return false;
        };
        if now.has_elapsed(planted_at, growth_duration) {
            self.growth_stage = GrowthStage::Ready;
            return true;
        }
        false
    }
}
