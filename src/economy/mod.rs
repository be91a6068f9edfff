//! Economy domain — the farmer's wallet, seed stock, and tax record.
//!
//! Every transition is guarded: a debit either succeeds in full or leaves
//! the state untouched and reports `false`.

use serde::{Deserialize, Serialize};

use crate::shared::*;

pub mod stats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    pub money: u32,
    pub seeds: u32,
    pub harvest_count: u32,
    pub tax_paid_count: u32,
    /// Successful payments so far. Never reset on a failed payment.
    pub tax_streak: u32,
    /// Reserved for an overdue-tax notice; nothing sets it yet.
    pub tax_due: bool,
    pub harvest_reward: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(STARTING_MONEY, STARTING_SEEDS)
    }
}

impl Economy {
    pub fn new(money: u32, seeds: u32) -> Self {
        Self {
            money,
            seeds,
            harvest_count: 0,
            tax_paid_count: 0,
            tax_streak: 0,
            tax_due: false,
            harvest_reward: HARVEST_REWARD,
        }
    }

    pub fn with_harvest_reward(mut self, reward: u32) -> Self {
        self.harvest_reward = reward;
        self
    }

    /// Credit the harvest reward. Only called after a crop was actually harvested.
    pub fn harvest(&mut self) {
        self.money = self.money.saturating_add(self.harvest_reward);
        self.harvest_count = self.harvest_count.saturating_add(1);
    }

    pub fn plant_seed(&mut self) -> bool {
        if self.seeds == 0 {
            return false;
        }
        self.seeds -= 1;
        true
    }

    pub fn pay_tax(&mut self, amount: u32) -> bool {
        if self.money < amount {
            return false;
        }
        self.money -= amount;
        self.tax_due = false;
        self.tax_paid_count = self.tax_paid_count.saturating_add(1);
        self.tax_streak = self.tax_streak.saturating_add(1);
        true
    }

    /// Buy `quantity` seeds at `price` each. A cost that overflows `u32`
    /// is simply unaffordable.
    pub fn buy_seeds(&mut self, price: u32, quantity: u32) -> bool {
        let Some(total_cost) = price.checked_mul(quantity) else {
            return false;
        };
        if self.money < total_cost {
            return false;
        }
        self.money -= total_cost;
        self.seeds = self.seeds.saturating_add(quantity);
        true
    }
}

/// Format a money amount with thousands separators (e.g. "$1,234").
pub fn format_money(amount: u32) -> String {
    let mut groups = Vec::new();
    let mut rest = amount;
    while rest >= 1000 {
        groups.push(format!("{:03}", rest % 1000));
        rest /= 1000;
    }
    groups.push(rest.to_string());
    groups.reverse();
    format!("${}", groups.join(","))
}
