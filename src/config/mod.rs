//! Simulation tuning, loaded from a RON file at startup.
//!
//! Every field has a default matching the reference game, so a config file
//! only needs to list what it overrides.

use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::path::Path;

use crate::shared::*;

pub const DEFAULT_CONFIG_PATH: &str = "config/harvest_tax.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub starting_money: u32,
    pub starting_seeds: u32,
    pub seed_price: u32,
    pub seeds_per_purchase: u32,
    pub tax_amount: u32,
    pub harvest_reward: u32,
    /// Seconds from planting to Ready.
    pub growth_duration: f64,
    pub agent_speed: f32,
    pub field: Bounds,
    pub shop: Bounds,
    pub tax_office: Bounds,
    pub initial_crops: usize,
    /// Fixed crop placement seed; `None` draws from entropy.
    pub rng_seed: Option<u64>,
    pub tick_rate_hz: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_money: STARTING_MONEY,
            starting_seeds: STARTING_SEEDS,
            seed_price: SEED_PRICE,
            seeds_per_purchase: SEEDS_PER_PURCHASE,
            tax_amount: TAX_AMOUNT,
            harvest_reward: HARVEST_REWARD,
            growth_duration: GROWTH_DURATION,
            agent_speed: AGENT_SPEED,
            field: Bounds::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
            shop: Bounds::new(SHOP_POSITION.0, SHOP_POSITION.1, ZONE_SIZE, ZONE_SIZE),
            tax_office: Bounds::new(
                TAX_OFFICE_POSITION.0,
                TAX_OFFICE_POSITION.1,
                ZONE_SIZE,
                ZONE_SIZE,
            ),
            initial_crops: 1,
            rng_seed: None,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl SimConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        let config: SimConfig =
            ron::from_str(text).map_err(|e| format!("Config parse failed: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, bounds) in [
            ("field", &self.field),
            ("shop", &self.shop),
            ("tax_office", &self.tax_office),
        ] {
            if !(bounds.w > 0.0 && bounds.h > 0.0) {
                return Err(format!(
                    "{} must have a positive size, got {}x{}",
                    name, bounds.w, bounds.h
                ));
            }
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(format!(
                "tick_rate_hz must be positive, got {}",
                self.tick_rate_hz
            ));
        }
        if !(self.growth_duration.is_finite() && self.growth_duration >= 0.0) {
            return Err(format!(
                "growth_duration must be a non-negative number of seconds, got {}",
                self.growth_duration
            ));
        }
        if !self.agent_speed.is_finite() {
            return Err("agent_speed must be finite".to_string());
        }
        Ok(())
    }

    /// The farmer starts at the centre of the field.
    pub fn agent_start(&self) -> (f32, f32) {
        let c = self.field.center();
        (c.x, c.y)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config(path: impl AsRef<Path>) -> Result<SimConfig, String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    SimConfig::from_ron_str(&text)
}

#[cfg(target_arch = "wasm32")]
pub fn load_config(_path: impl AsRef<Path>) -> Result<SimConfig, String> {
    Err("Config files not available in browser".to_string())
}
