//! Journal Core: trade log and account-risk rules for a personal trading journal.
//!
//! This crate contains:
//! - Domain types (trade records, ids, lenient amounts, time-of-day stamps)
//! - Per-account configuration (risk settings, goals) loaded from TOML
//! - A chronologically ordered trade log
//! - The trailing drawdown engine with breakeven lock
//! - Consistency rule, goal progress, weekday breakdown, journal statistics
//! - History filtering and the end-of-day equity/floor series
//! - Journal goals (dated intentions marked achieved or pending)
//! - An account summary that ties them together
//!
//! Every rule is a pure function over a sorted snapshot; nothing is cached
//! between calls.

pub mod consistency;
pub mod domain;
pub mod drawdown;
pub mod filter;
pub mod goals;
pub mod journal_goals;
pub mod ledger;
pub mod settings;
pub mod stats;
pub mod summary;
pub mod weekday;

pub use consistency::{ConsistencyReport, ConsistencyStatus};
pub use domain::{Direction, GoalId, Outcome, TradeId, TradeRecord};
pub use drawdown::{compute, daily_series, DrawdownState, EquityPoint};
pub use filter::{FilterError, MarketFilter, TradeFilter};
pub use goals::{GoalProgress, PeriodProgress};
pub use journal_goals::{GoalBoard, GoalBoardError, GoalEntry};
pub use ledger::{LedgerError, TradeLog};
pub use settings::{AccountConfig, ConfigError, Goals, RiskSettings, SettingsError};
pub use stats::TradeStats;
pub use summary::AccountSummary;
pub use weekday::{WeekdayBreakdown, WeekdayStats};
