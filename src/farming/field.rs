//! The crop field: placement, growth advancement, and plant/harvest resolution.

use bevy::log::debug;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Timestamp;
use crate::economy::Economy;
use crate::shared::*;

use super::{Crop, GrowthStage};

#[derive(Debug, Clone)]
pub struct CropField {
    bounds: Bounds,
    crops: Vec<Crop>,
    growth_duration: f64,
    rng: StdRng,
}

impl CropField {
    /// Build a field and populate it with `initial_crops` Seed crops.
    /// `seed` fixes crop placement; `None` draws from entropy.
    pub fn new(bounds: Bounds, initial_crops: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut field = Self {
            bounds,
            crops: Vec::with_capacity(initial_crops),
            growth_duration: GROWTH_DURATION,
            rng,
        };
        for _ in 0..initial_crops {
            field.spawn_crop();
        }
        field
    }

    /// A field holding exactly the given crops, for callers that need a fixed layout.
    pub fn with_crops(bounds: Bounds, crops: Vec<Crop>, seed: u64) -> Self {
        Self {
            bounds,
            crops,
            growth_duration: GROWTH_DURATION,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_growth_duration(mut self, secs: f64) -> Self {
        self.growth_duration = secs;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn growth_duration(&self) -> f64 {
        self.growth_duration
    }

    /// Crops in insertion order.
    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn ready_count(&self) -> usize {
        self.count_stage(GrowthStage::Ready)
    }

    pub fn growing_count(&self) -> usize {
        self.count_stage(GrowthStage::Growing)
    }

    fn count_stage(&self, stage: GrowthStage) -> usize {
        self.crops.iter().filter(|c| c.growth_stage == stage).count()
    }

    /// Append a Seed crop at a random position inside the field, inset from
    /// every edge.
    pub fn spawn_crop(&mut self) {
        let (x, y) = self.random_spawn_point();
        debug!("[Farming] Spawned crop at ({}, {})", x, y);
        self.crops.push(Crop::seed_at(x, y));
    }

    fn random_spawn_point(&mut self) -> (f32, f32) {
        let b = self.bounds;
        let x = pick_coordinate(&mut self.rng, b.x, b.w);
        let y = pick_coordinate(&mut self.rng, b.y, b.h);
        (x, y)
    }

    /// Promote every Growing crop whose timer has run out.
    pub fn advance(&mut self, now: Timestamp) {
        let duration = self.growth_duration;
        for crop in &mut self.crops {
            if crop.grow(now, duration) {
                debug!(
                    "[Farming] Crop at ({}, {}) is {}",
                    crop.bounds.x,
                    crop.bounds.y,
                    crop.growth_stage.label()
                );
            }
        }
    }

    /// Resolve an interact press at `point` against the first crop that
    /// contains it.
    pub fn try_interact(&mut self, point: Vec2, now: Timestamp, economy: &mut Economy) -> SimEvent {
        let Some(index) = self.crops.iter().position(|c| c.bounds.contains(point)) else {
            return SimEvent::NoTarget;
        };

        match self.crops[index].growth_stage {
            GrowthStage::Seed => {
                if !economy.plant_seed() {
                    return SimEvent::PlantDenied;
                }
                self.crops[index].plant(now);
                SimEvent::Planted {
                    seeds_left: economy.seeds,
                }
            }
            GrowthStage::Growing => SimEvent::NotReady,
            GrowthStage::Ready => {
                self.crops.remove(index);
                economy.harvest();
                self.spawn_crop();
                SimEvent::Harvested {
                    reward: economy.harvest_reward,
                    money: economy.money,
                }
            }
        }
    }
}

/// Integer coordinate in `[origin + inset, origin + extent - crop - inset]`,
/// inclusive. A range that would be empty collapses to its lower end.
fn pick_coordinate(rng: &mut StdRng, origin: f32, extent: f32) -> f32 {
    let lo = (origin + CROP_SPAWN_INSET).ceil() as i32;
    let hi = (origin + extent - CROP_SIZE - CROP_SPAWN_INSET).floor() as i32;
    if hi <= lo {
        return lo as f32;
    }
    rng.gen_range(lo..=hi) as f32
}
