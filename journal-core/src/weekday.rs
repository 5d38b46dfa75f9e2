//! Monday–Friday performance breakdown.
//!
//! Weekend-dated trades are left out.

use crate::domain::TradeRecord;
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

pub const TRADING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekdayStats {
    pub weekday: Weekday,
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
}

impl WeekdayStats {
    fn empty(weekday: Weekday) -> Self {
        Self {
            weekday,
            pnl: 0.0,
            trades: 0,
            wins: 0,
        }
    }

    pub fn win_rate_pct(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trades as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBreakdown {
    pub days: Vec<WeekdayStats>,
}

impl WeekdayBreakdown {
    pub fn get(&self, weekday: Weekday) -> Option<&WeekdayStats> {
        self.days.iter().find(|d| d.weekday == weekday)
    }

    /// Weekday with the highest P&L among days that traded.
    pub fn best(&self) -> Option<&WeekdayStats> {
        self.days
            .iter()
            .filter(|d| d.trades > 0)
            .fold(None, |best: Option<&WeekdayStats>, d| match best {
                Some(b) if b.pnl >= d.pnl => Some(b),
                _ => Some(d),
            })
    }
}

pub fn breakdown(trades: &[TradeRecord]) -> WeekdayBreakdown {
    let mut days: Vec<WeekdayStats> = TRADING_DAYS.iter().map(|&d| WeekdayStats::empty(d)).collect();

    for trade in trades {
        let idx = trade.date.weekday().num_days_from_monday() as usize;
        if let Some(stats) = days.get_mut(idx) {
            stats.pnl += trade.contribution();
            stats.trades += 1;
            if trade.is_winner() {
                stats.wins += 1;
            }
        }
    }

    WeekdayBreakdown { days }
}
