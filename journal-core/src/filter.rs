//! Trade history filter: year, month, market side or instrument, and result.
//!
//! Every criterion is optional; an empty filter matches everything.

use crate::domain::{Direction, Outcome, TradeRecord};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("market filter must not be empty")]
    EmptyMarket,

    #[error("unknown result '{0}' (expected win, loss or neutral)")]
    UnknownOutcome(String),
}

/// Side or instrument criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketFilter {
    Long,
    Short,
    /// Trades with no direction recorded.
    Undirected,
    /// Exact instrument symbol.
    Instrument(String),
}

impl MarketFilter {
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        match self {
            Self::Long => trade.direction == Some(Direction::Long),
            Self::Short => trade.direction == Some(Direction::Short),
            Self::Undirected => trade.direction.is_none(),
            Self::Instrument(symbol) => trade.instrument.as_deref() == Some(symbol.as_str()),
        }
    }
}

/// `long`/`bullish`, `short`/`bearish`, `none`; anything else is an
/// instrument symbol.
impl FromStr for MarketFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_ascii_lowercase().as_str() {
            "" => return Err(FilterError::EmptyMarket),
            "long" | "bullish" => Self::Long,
            "short" | "bearish" => Self::Short,
            "none" => Self::Undirected,
            _ => Self::Instrument(s.to_string()),
        })
    }
}

impl FromStr for Outcome {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "neutral" => Ok(Self::Neutral),
            _ => Err(FilterError::UnknownOutcome(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub year: Option<i32>,
    /// Calendar month, 1–12.
    pub month: Option<u32>,
    pub market: Option<MarketFilter>,
    pub result: Option<Outcome>,
}

impl TradeFilter {
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        self.year.map_or(true, |y| trade.date.year() == y)
            && self.month.map_or(true, |m| trade.date.month() == m)
            && self.market.as_ref().map_or(true, |f| f.matches(trade))
            && self.result.map_or(true, |r| trade.outcome() == r)
    }

    /// Matching trades in their original order.
    pub fn apply<'a>(&self, trades: &'a [TradeRecord]) -> Vec<&'a TradeRecord> {
        trades.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trade(id: u64, y: i32, m: u32, amount: f64) -> TradeRecord {
        TradeRecord::new(id, NaiveDate::from_ymd_opt(y, m, 10).unwrap(), amount)
    }

    fn sample() -> Vec<TradeRecord> {
        let mut a = trade(1, 2023, 12, 150.0);
        a.direction = Some(Direction::Long);
        a.instrument = Some("MES".into());
        let mut b = trade(2, 2024, 1, -80.0);
        b.direction = Some(Direction::Short);
        b.instrument = Some("MNQ".into());
        let mut c = trade(3, 2024, 1, 0.0);
        c.instrument = Some("MES".into());
        let mut d = trade(4, 2024, 2, 220.0);
        d.direction = Some(Direction::Long);
        vec![a, b, c, d]
    }

    fn ids(filter: &TradeFilter, trades: &[TradeRecord]) -> Vec<u64> {
        filter.apply(trades).iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn empty_filter_matches_all() {
        assert_eq!(ids(&TradeFilter::default(), &sample()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn year_and_month() {
        let trades = sample();
        let by_year = TradeFilter {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(ids(&by_year, &trades), vec![2, 3, 4]);

        let by_month = TradeFilter {
            month: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&by_month, &trades), vec![2, 3]);
    }

    #[test]
    fn market_side_and_instrument() {
        let trades = sample();
        let with = |market: MarketFilter| TradeFilter {
            market: Some(market),
            ..Default::default()
        };
        assert_eq!(ids(&with(MarketFilter::Long), &trades), vec![1, 4]);
        assert_eq!(ids(&with(MarketFilter::Short), &trades), vec![2]);
        assert_eq!(ids(&with(MarketFilter::Undirected), &trades), vec![3]);
        assert_eq!(ids(&with(MarketFilter::Instrument("MES".into())), &trades), vec![1, 3]);
    }

    #[test]
    fn result_and_combined() {
        let trades = sample();
        let neutral = TradeFilter {
            result: Some(Outcome::Neutral),
            ..Default::default()
        };
        assert_eq!(ids(&neutral, &trades), vec![3]);

        let long_wins_2024 = TradeFilter {
            year: Some(2024),
            market: Some(MarketFilter::Long),
            result: Some(Outcome::Win),
            ..Default::default()
        };
        assert_eq!(ids(&long_wins_2024, &trades), vec![4]);
    }

    #[test]
    fn parses_cli_values() {
        assert_eq!("Bullish".parse::<MarketFilter>(), Ok(MarketFilter::Long));
        assert_eq!("short".parse::<MarketFilter>(), Ok(MarketFilter::Short));
        assert_eq!("none".parse::<MarketFilter>(), Ok(MarketFilter::Undirected));
        assert_eq!(
            "MNQ".parse::<MarketFilter>(),
            Ok(MarketFilter::Instrument("MNQ".into()))
        );
        assert_eq!(" ".parse::<MarketFilter>(), Err(FilterError::EmptyMarket));

        assert_eq!("LOSS".parse::<Outcome>(), Ok(Outcome::Loss));
        assert!("breakeven".parse::<Outcome>().is_err());
    }
}
