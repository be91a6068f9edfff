//! Fixed economic zones — the seed shop and the tax office.
//!
//! Each zone is a rectangle with exactly one effect. Zones never look at
//! crops or at each other.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::economy::Economy;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneEffect {
    Shop { seed_price: u32, quantity: u32 },
    TaxOffice { amount: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionZone {
    pub bounds: Bounds,
    pub effect: ZoneEffect,
}

impl InteractionZone {
    pub fn shop(bounds: Bounds, seed_price: u32, quantity: u32) -> Self {
        Self {
            bounds,
            effect: ZoneEffect::Shop {
                seed_price,
                quantity,
            },
        }
    }

    pub fn tax_office(bounds: Bounds, amount: u32) -> Self {
        Self {
            bounds,
            effect: ZoneEffect::TaxOffice { amount },
        }
    }

    pub fn name(&self) -> &'static str {
        match self.effect {
            ZoneEffect::Shop { .. } => "Shop",
            ZoneEffect::TaxOffice { .. } => "Tax Office",
        }
    }

    /// Apply the zone's effect if `point` is inside it. `None` means the
    /// point missed the zone and nothing happened.
    pub fn try_interact(&self, point: Vec2, economy: &mut Economy) -> Option<SimEvent> {
        if !self.bounds.contains(point) {
            return None;
        }

        let event = match self.effect {
            ZoneEffect::Shop {
                seed_price,
                quantity,
            } => {
                if economy.buy_seeds(seed_price, quantity) {
                    SimEvent::Bought {
                        quantity,
                        cost: seed_price.saturating_mul(quantity),
                        seeds: economy.seeds,
                        money: economy.money,
                    }
                } else {
                    SimEvent::BuyDenied
                }
            }
            ZoneEffect::TaxOffice { amount } => {
                if economy.pay_tax(amount) {
                    SimEvent::TaxPaid {
                        amount,
                        money: economy.money,
                        tax_paid_count: economy.tax_paid_count,
                    }
                } else {
                    SimEvent::TaxDenied
                }
            }
        };
        Some(event)
    }
}
