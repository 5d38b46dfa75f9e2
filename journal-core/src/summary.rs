//! AccountSummary: everything the dashboard shows for one account, computed
//! in one go from the trade log and the account config.

use crate::consistency::{self, ConsistencyReport};
use crate::domain::TradeRecord;
use crate::drawdown::DrawdownState;
use crate::goals::{self, GoalProgress};
use crate::ledger::TradeLog;
use crate::settings::AccountConfig;
use crate::stats::TradeStats;
use crate::weekday::{self, WeekdayBreakdown};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of trades listed under "recent".
pub const RECENT_TRADES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub name: Option<String>,
    pub as_of: NaiveDate,
    pub trade_count: usize,

    // ── Balance ──
    pub initial_balance: f64,
    pub total_pnl: f64,
    pub current_balance: f64,
    pub roi_pct: f64,

    // ── Risk ──
    pub drawdown: DrawdownState,
    pub margin_to_floor: f64,
    pub breached: bool,
    pub consistency: Option<ConsistencyReport>,

    // ── Progress ──
    pub goals: GoalProgress,
    pub weekdays: WeekdayBreakdown,
    pub stats: TradeStats,
    pub recent: Vec<TradeRecord>,
}

impl AccountSummary {
    pub fn build(log: &TradeLog, config: &AccountConfig, as_of: NaiveDate) -> Self {
        let risk = &config.risk;
        let trades = log.records();

        let drawdown = log.drawdown(risk);
        let total_pnl = log.total_pnl();
        // Balance, margin and breach all derive from this one figure.
        let current_balance = risk.initial_balance + total_pnl;
        let roi_pct = if risk.initial_balance > 0.0 {
            total_pnl / risk.initial_balance * 100.0
        } else {
            0.0
        };

        let breached = drawdown.is_breached_at(current_balance);
        if breached {
            tracing::warn!(
                balance = current_balance,
                floor = drawdown.drawdown_floor,
                "balance below drawdown floor"
            );
        }

        Self {
            name: config.name.clone(),
            as_of,
            trade_count: trades.len(),
            initial_balance: risk.initial_balance,
            total_pnl,
            current_balance,
            roi_pct,
            margin_to_floor: drawdown.margin_at(current_balance),
            breached,
            drawdown,
            consistency: consistency::evaluate(trades, risk.consistency_percentage),
            goals: goals::progress(trades, &config.goals, as_of),
            weekdays: weekday::breakdown(trades),
            stats: TradeStats::compute(trades),
            recent: log.recent(RECENT_TRADES).into_iter().cloned().collect(),
        }
    }
}
