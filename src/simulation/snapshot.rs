use serde::{Deserialize, Serialize};

use crate::farming::GrowthStage;

/// Read-only view of the simulation after a tick, for renderers and logs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub tick: u64,
    pub time: f64,
    pub agent_x: f32,
    pub agent_y: f32,
    pub money: u32,
    pub seeds: u32,
    pub harvest_count: u32,
    pub tax_paid_count: u32,
    pub tax_streak: u32,
    /// Crops in field order.
    pub crops: Vec<CropView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropView {
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    pub stage: GrowthStage,
}

impl SimSnapshot {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Snapshot serialization failed: {}", e))
    }
}
