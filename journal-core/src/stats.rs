//! Journal statistics: pure functions over the trade list.
//!
//! Wins, losses and neutrals are classified by [`TradeRecord::outcome`].
//! Neutral trades count toward the total but not toward the win rate.

use crate::domain::{time, Outcome, TradeRecord};
use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub total: usize,
    pub winners: usize,
    pub losers: usize,
    pub neutral: usize,

    // ── Ratios ──
    /// Winners over decided trades (winners + losers), in percent.
    pub win_rate_pct: f64,
    /// Gross profit over gross loss. `None` when there are profits but no
    /// losses (unbounded).
    pub profit_factor: Option<f64>,

    // ── Money ──
    pub gross_profit: f64,
    /// Sum of losing trades as a positive magnitude.
    pub gross_loss: f64,
    pub net_profit: f64,
    pub avg_win: f64,
    /// Mean losing trade as a positive magnitude.
    pub avg_loss: f64,

    // ── Holding time ──
    /// Mean holding time in whole seconds over trades with both stamps.
    pub avg_holding_secs: Option<i64>,
}

impl TradeStats {
    pub fn compute(trades: &[TradeRecord]) -> Self {
        let mut winners = 0;
        let mut losers = 0;
        let mut gross_profit = 0.0;
        let mut gross_loss = 0.0;
        for trade in trades {
            match trade.outcome() {
                Outcome::Win => {
                    winners += 1;
                    gross_profit += trade.contribution();
                }
                Outcome::Loss => {
                    losers += 1;
                    gross_loss -= trade.contribution();
                }
                Outcome::Neutral => {}
            }
        }

        Self {
            total: trades.len(),
            winners,
            losers,
            neutral: trades.len() - winners - losers,
            win_rate_pct: win_rate(trades) * 100.0,
            profit_factor: profit_factor(trades),
            gross_profit,
            gross_loss,
            net_profit: gross_profit - gross_loss,
            avg_win: mean(gross_profit, winners),
            avg_loss: mean(gross_loss, losers),
            avg_holding_secs: average_holding(trades).map(|d| d.num_seconds()),
        }
    }

    pub fn avg_holding(&self) -> Option<Duration> {
        self.avg_holding_secs.map(Duration::seconds)
    }

    /// Mean holding time as `"{h}h {m}m {s}s"`, or `"N/A"`.
    pub fn avg_holding_label(&self) -> String {
        self.avg_holding()
            .map_or_else(|| "N/A".to_string(), time::format_duration)
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Fraction of decided trades that won. Neutral trades are ignored; zero
/// when nothing was decided.
pub fn win_rate(trades: &[TradeRecord]) -> f64 {
    let winners = trades.iter().filter(|t| t.outcome() == Outcome::Win).count();
    let losers = trades.iter().filter(|t| t.outcome() == Outcome::Loss).count();
    if winners + losers == 0 {
        return 0.0;
    }
    winners as f64 / (winners + losers) as f64
}

/// Gross profit / gross loss.
///
/// `Some(0.0)` when there is nothing on either side, `None` when there are
/// profits but no losses.
pub fn profit_factor(trades: &[TradeRecord]) -> Option<f64> {
    let gross_profit: f64 = trades
        .iter()
        .map(TradeRecord::contribution)
        .filter(|v| *v > 0.0)
        .sum();
    let gross_loss: f64 = trades
        .iter()
        .map(TradeRecord::contribution)
        .filter(|v| *v < 0.0)
        .map(f64::abs)
        .sum();

    if gross_loss > 0.0 {
        Some(gross_profit / gross_loss)
    } else if gross_profit > 0.0 {
        None
    } else {
        Some(0.0)
    }
}

/// Mean holding time over trades with a valid entry/exit pair, truncated to
/// whole seconds.
pub fn average_holding(trades: &[TradeRecord]) -> Option<Duration> {
    let held: Vec<i64> = trades
        .iter()
        .filter_map(TradeRecord::duration)
        .map(|d| d.num_seconds())
        .collect();
    if held.is_empty() {
        return None;
    }
    let total: i64 = held.iter().sum();
    Some(Duration::seconds(total / held.len() as i64))
}
