//! TradeRecord: one journaled trading operation.

use super::amount;
use super::ids::TradeId;
use super::time;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Market direction of a discretionary trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

/// Result class of a trade by its contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Neutral,
}

/// A journaled trade.
///
/// Only `net_amount` feeds the accounting rules; `date` and `entry_time`
/// decide chronological order. Everything else is carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    // ── Identification ──
    pub id: TradeId,
    pub date: NaiveDate,

    // ── Timing ──
    #[serde(default, with = "time::hms", skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<NaiveTime>,
    #[serde(default, with = "time::hms", skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<NaiveTime>,

    // ── PnL ──
    /// Money gained or lost. `None` when the source value was missing or
    /// unreadable.
    #[serde(default, with = "amount::lenient")]
    pub net_amount: Option<f64>,

    // ── Descriptive ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contracts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Perceived news impact, 0–5 stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reference to attached media (screenshot path or data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl TradeRecord {
    /// A bare record with only the fields the accounting rules read.
    pub fn new(id: u64, date: NaiveDate, net_amount: f64) -> Self {
        Self {
            id: TradeId(id),
            date,
            entry_time: None,
            exit_time: None,
            net_amount: Some(net_amount),
            instrument: None,
            strategy: None,
            direction: None,
            contracts: None,
            entry_type: None,
            exit_type: None,
            mood: None,
            news_rating: None,
            notes: None,
            media: None,
        }
    }

    pub fn with_times(mut self, entry: Option<NaiveTime>, exit: Option<NaiveTime>) -> Self {
        self.entry_time = entry;
        self.exit_time = exit;
        self
    }

    /// Balance contribution. Missing or non-finite amounts count as zero.
    pub fn contribution(&self) -> f64 {
        match self.net_amount {
            Some(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.contribution() > 0.0
    }

    /// Missing and non-finite amounts are neutral, like a flat trade.
    pub fn outcome(&self) -> Outcome {
        let v = self.contribution();
        if v > 0.0 {
            Outcome::Win
        } else if v < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Neutral
        }
    }

    /// Chronological sort key: date, then entry time (midnight when absent).
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.entry_time.unwrap_or(NaiveTime::MIN))
    }

    /// Holding time. `None` when either stamp is missing or exit precedes
    /// entry.
    pub fn duration(&self) -> Option<Duration> {
        let (entry, exit) = (self.entry_time?, self.exit_time?);
        let held = exit - entry;
        (held >= Duration::zero()).then_some(held)
    }
}
