//! Weekly and monthly profit-goal progress.

use crate::domain::TradeRecord;
use crate::settings::Goals;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodProgress {
    pub target: f64,
    pub pnl: f64,
    /// `pnl / target * 100`; zero when no target is set.
    pub percent: f64,
}

impl PeriodProgress {
    fn new(target: f64, pnl: f64) -> Self {
        let percent = if target > 0.0 { pnl / target * 100.0 } else { 0.0 };
        Self {
            target,
            pnl,
            percent,
        }
    }

    pub fn is_met(&self) -> bool {
        self.target > 0.0 && self.pnl >= self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub weekly: PeriodProgress,
    pub monthly: PeriodProgress,
}

/// Progress toward the goals for the ISO week and calendar month containing
/// `today`.
pub fn progress(trades: &[TradeRecord], goals: &Goals, today: NaiveDate) -> GoalProgress {
    let week = today.iso_week();
    let weekly_pnl: f64 = trades
        .iter()
        .filter(|t| t.date.iso_week() == week)
        .map(TradeRecord::contribution)
        .sum();
    let monthly_pnl: f64 = trades
        .iter()
        .filter(|t| t.date.year() == today.year() && t.date.month() == today.month())
        .map(TradeRecord::contribution)
        .sum();

    GoalProgress {
        weekly: PeriodProgress::new(goals.weekly, weekly_pnl),
        monthly: PeriodProgress::new(goals.monthly, monthly_pnl),
    }
}
