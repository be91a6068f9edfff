use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::host::SimEventMessage;
use crate::shared::*;

/// Running totals over the whole session, derived from emitted events.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyStats {
    pub total_money_earned: u64,
    pub total_money_spent: u64,
    pub total_tax_paid: u64,
    pub seeds_bought: u64,
    pub seeds_planted: u64,
    pub crops_harvested: u64,
    pub denied_actions: u64,
    pub total_transactions: u64,
}

impl EconomyStats {
    pub fn record(&mut self, event: &SimEvent) {
        match *event {
            SimEvent::Planted { .. } => {
                self.seeds_planted = self.seeds_planted.saturating_add(1);
            }
            SimEvent::Harvested { reward, .. } => {
                self.crops_harvested = self.crops_harvested.saturating_add(1);
                self.total_money_earned = self.total_money_earned.saturating_add(reward as u64);
                self.total_transactions += 1;
            }
            SimEvent::Bought { quantity, cost, .. } => {
                self.seeds_bought = self.seeds_bought.saturating_add(quantity as u64);
                self.total_money_spent = self.total_money_spent.saturating_add(cost as u64);
                self.total_transactions += 1;
            }
            SimEvent::TaxPaid { amount, .. } => {
                self.total_tax_paid = self.total_tax_paid.saturating_add(amount as u64);
                self.total_money_spent = self.total_money_spent.saturating_add(amount as u64);
                self.total_transactions += 1;
            }
            SimEvent::PlantDenied | SimEvent::BuyDenied | SimEvent::TaxDenied => {
                self.denied_actions = self.denied_actions.saturating_add(1);
            }
            SimEvent::NotReady | SimEvent::NoTarget => {}
        }
    }
}

/// Reads `SimEventMessage` and folds each outcome into `EconomyStats`.
pub fn track_economy_stats(
    mut events: EventReader<SimEventMessage>,
    mut stats: ResMut<EconomyStats>,
) {
    for ev in events.read() {
        stats.record(&ev.0);
    }
}
