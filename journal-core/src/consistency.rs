//! Consistency rule: no single day may carry too much of the profit.
//!
//! Trades are grouped by calendar date. Among the days that closed positive,
//! the best day's share of total positive-day profit must stay at or below
//! `consistency_percentage`. Above 80% of the limit the rule warns.

use crate::domain::TradeRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fraction of the limit at which the rule starts warning.
pub const WARNING_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyStatus {
    Ok,
    Warning,
    Violated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Most profitable day (earliest on ties).
    pub best_day: NaiveDate,
    pub best_day_profit: f64,
    /// Sum of every positive day.
    pub total_positive: f64,
    pub positive_days: usize,
    /// Best day as a percentage of `total_positive`.
    pub percentage: f64,
    pub limit_pct: u32,
    /// `percentage / limit`, capped at 100.
    pub progress_pct: f64,
    pub status: ConsistencyStatus,
}

/// Net P&L per calendar date.
pub fn daily_totals(trades: &[TradeRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut days = BTreeMap::new();
    for trade in trades {
        *days.entry(trade.date).or_insert(0.0) += trade.contribution();
    }
    days
}

/// Evaluate the rule. `None` when no day closed positive.
pub fn evaluate(trades: &[TradeRecord], limit_pct: u32) -> Option<ConsistencyReport> {
    let positive: Vec<(NaiveDate, f64)> = daily_totals(trades)
        .into_iter()
        .filter(|&(_, pnl)| pnl > 0.0)
        .collect();

    let (best_day, best_day_profit) = positive
        .iter()
        .copied()
        .fold(None, |best: Option<(NaiveDate, f64)>, day| match best {
            Some(b) if b.1 >= day.1 => Some(b),
            _ => Some(day),
        })?;

    let total_positive: f64 = positive.iter().map(|&(_, pnl)| pnl).sum();
    let percentage = best_day_profit / total_positive * 100.0;
    let limit = f64::from(limit_pct);
    let progress_pct = if limit > 0.0 {
        (percentage / limit * 100.0).min(100.0)
    } else {
        100.0
    };

    let status = if percentage > limit {
        ConsistencyStatus::Violated
    } else if percentage > limit * WARNING_RATIO {
        ConsistencyStatus::Warning
    } else {
        ConsistencyStatus::Ok
    };

    Some(ConsistencyReport {
        best_day,
        best_day_profit,
        total_positive,
        positive_days: positive.len(),
        percentage,
        limit_pct,
        progress_pct,
        status,
    })
}
