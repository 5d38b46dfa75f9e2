//! Trailing drawdown with breakeven lock.
//!
//! **Core rule:** the drawdown floor trails `trailing_drawdown_amount` below
//! the peak balance, but once the peak has ever reached
//! `initial_balance + trailing_drawdown_amount` (the buffer threshold) the
//! floor locks at `initial_balance` for good.
//!
//! Everything is recomputed from the full, chronologically sorted trade
//! snapshot on every call. There is no incremental state: callers hold the
//! latest [`DrawdownState`] and recompute after any change to the trades or
//! the settings.

use crate::domain::TradeRecord;
use crate::settings::RiskSettings;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Output of the drawdown engine for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownState {
    /// Highest balance ever observed, starting with the initial balance.
    pub high_water_mark: f64,
    /// Capital level below which the account is breached.
    pub drawdown_floor: f64,
    /// Balance after the last trade.
    pub current_balance: f64,
    /// Whether the peak ever reached the buffer threshold.
    pub floor_locked: bool,
}

impl DrawdownState {
    /// Distance between the current balance and the floor. Negative when
    /// breached.
    pub fn margin_to_floor(&self) -> f64 {
        self.margin_at(self.current_balance)
    }

    pub fn is_breached(&self) -> bool {
        self.is_breached_at(self.current_balance)
    }

    /// Margin for a balance computed elsewhere, e.g. `initial + total_pnl`.
    pub fn margin_at(&self, balance: f64) -> f64 {
        balance - self.drawdown_floor
    }

    pub fn is_breached_at(&self, balance: f64) -> bool {
        balance < self.drawdown_floor
    }
}

/// End-of-day balance and floor, one per trading date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub balance: f64,
    pub drawdown_floor: f64,
}

/// Running balance, peak and lock over a trade sequence.
struct Walk {
    balance: f64,
    peak: f64,
    locked: bool,
    threshold: f64,
}

impl Walk {
    fn start(settings: &RiskSettings) -> Self {
        Self {
            balance: settings.initial_balance,
            peak: settings.initial_balance,
            locked: false,
            threshold: settings.buffer_threshold(),
        }
    }

    fn step(&mut self, trade: &TradeRecord) {
        self.balance += trade.contribution();
        if self.balance > self.peak {
            self.peak = self.balance;
        }
        if self.balance >= self.threshold {
            self.locked = true;
        }
    }

    fn floor(&self, settings: &RiskSettings) -> f64 {
        let initial = settings.initial_balance;
        let base_floor = settings.base_floor();
        if self.locked {
            initial.max(base_floor).min(initial)
        } else {
            (self.peak - settings.trailing_drawdown_amount).max(base_floor)
        }
    }
}

/// Compute high-water mark and drawdown floor for a sorted trade sequence.
///
/// Total: missing or non-finite amounts contribute zero. Trades must be in
/// chronological order; an unsorted slice yields an unspecified (but finite
/// for finite settings) result.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use journal_core::domain::TradeRecord;
/// use journal_core::drawdown::compute;
/// use journal_core::settings::RiskSettings;
///
/// let settings = RiskSettings::new(50_000.0, 2_500.0);
/// let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
///
/// // Peak 51 000 stays below the 52 500 threshold: floor trails.
/// let trades = vec![TradeRecord::new(1, day, 1_000.0), TradeRecord::new(2, day, -500.0)];
/// let state = compute(&trades, &settings);
/// assert_eq!(state.high_water_mark, 51_000.0);
/// assert_eq!(state.drawdown_floor, 48_500.0);
/// assert!(!state.floor_locked);
/// ```
pub fn compute(trades: &[TradeRecord], settings: &RiskSettings) -> DrawdownState {
    let mut walk = Walk::start(settings);
    for trade in trades {
        walk.step(trade);
    }
    let drawdown_floor = walk.floor(settings);

    tracing::trace!(
        trades = trades.len(),
        high_water_mark = walk.peak,
        drawdown_floor,
        floor_locked = walk.locked,
        "drawdown recomputed"
    );

    DrawdownState {
        high_water_mark: walk.peak,
        drawdown_floor,
        current_balance: walk.balance,
        floor_locked: walk.locked,
    }
}

/// Balance and floor at the close of every trading date, for the capital
/// growth curve.
///
/// A non-empty series opens with an anchor the day before the first trade at
/// `initial_balance` and the starting floor. Each later point applies the
/// same rule as [`compute`] to the trades up to and including that date, so
/// the last point always agrees with `compute` over the whole slice.
pub fn daily_series(trades: &[TradeRecord], settings: &RiskSettings) -> Vec<EquityPoint> {
    let mut points = Vec::new();
    let Some(first) = trades.first() else {
        return points;
    };
    if let Some(anchor) = first.date.pred_opt() {
        points.push(EquityPoint {
            date: anchor,
            balance: settings.initial_balance,
            drawdown_floor: settings.base_floor(),
        });
    }

    let mut walk = Walk::start(settings);
    for (i, trade) in trades.iter().enumerate() {
        walk.step(trade);
        let closes_day = trades.get(i + 1).map_or(true, |next| next.date != trade.date);
        if closes_day {
            points.push(EquityPoint {
                date: trade.date,
                balance: walk.balance,
                drawdown_floor: walk.floor(settings),
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RiskSettings {
        RiskSettings::new(50_000.0, 2_500.0)
    }

    fn trades(amounts: &[f64]) -> Vec<TradeRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                TradeRecord::new(i as u64 + 1, start + chrono::Duration::days(i as i64), a)
            })
            .collect()
    }

    #[test]
    fn test_no_trades() {
        let state = compute(&[], &settings());
        assert_eq!(state.high_water_mark, 50_000.0);
        assert_eq!(state.drawdown_floor, 47_500.0);
        assert_eq!(state.current_balance, 50_000.0);
        assert!(!state.floor_locked);
        assert_eq!(state.margin_to_floor(), 2_500.0);
    }

    #[test]
    fn test_lock_on_single_big_win() {
        let state = compute(&trades(&[3_000.0]), &settings());
        assert_eq!(state.high_water_mark, 53_000.0);
        assert_eq!(state.drawdown_floor, 50_000.0);
        assert!(state.floor_locked);
    }

    #[test]
    fn test_trailing_below_threshold() {
        let state = compute(&trades(&[1_000.0, -500.0]), &settings());
        assert_eq!(state.high_water_mark, 51_000.0);
        assert_eq!(state.drawdown_floor, 48_500.0);
        assert_eq!(state.current_balance, 50_500.0);
    }

    #[test]
    fn test_locked_floor_survives_drop() {
        let state = compute(&trades(&[3_000.0, -4_000.0]), &settings());
        assert_eq!(state.drawdown_floor, 50_000.0);
        assert_eq!(state.current_balance, 49_000.0);
        assert!(state.is_breached());
        assert_eq!(state.margin_to_floor(), -1_000.0);
    }

    #[test]
    fn test_exact_threshold_locks() {
        let state = compute(&trades(&[2_500.0]), &settings());
        assert!(state.floor_locked);
        assert_eq!(state.drawdown_floor, 50_000.0);
    }

    #[test]
    fn test_just_below_threshold_trails() {
        let state = compute(&trades(&[2_499.0]), &settings());
        assert!(!state.floor_locked);
        assert_eq!(state.drawdown_floor, 49_999.0);
    }

    #[test]
    fn test_lock_reached_over_several_trades() {
        // 50k → 51.5k → 52.5k (lock) → 51k
        let state = compute(&trades(&[1_500.0, 1_000.0, -1_500.0]), &settings());
        assert!(state.floor_locked);
        assert_eq!(state.high_water_mark, 52_500.0);
        assert_eq!(state.drawdown_floor, 50_000.0);
        assert!(!state.is_breached());
    }

    #[test]
    fn test_losses_only_keep_base_floor() {
        let state = compute(&trades(&[-800.0, -1_200.0]), &settings());
        assert_eq!(state.high_water_mark, 50_000.0);
        assert_eq!(state.drawdown_floor, 47_500.0);
        assert_eq!(state.current_balance, 48_000.0);
        assert!(!state.is_breached());
    }

    #[test]
    fn test_deep_loss_breaches_base_floor() {
        let state = compute(&trades(&[-3_000.0]), &settings());
        assert_eq!(state.drawdown_floor, 47_500.0);
        assert!(state.is_breached());
    }

    #[test]
    fn test_missing_and_nan_amounts_contribute_zero() {
        let mut ts = trades(&[1_000.0, 0.0, 0.0]);
        ts[1].net_amount = None;
        ts[2].net_amount = Some(f64::NAN);
        let state = compute(&ts, &settings());
        assert_eq!(state.high_water_mark, 51_000.0);
        assert_eq!(state.current_balance, 51_000.0);
        assert_eq!(state.drawdown_floor, 48_500.0);
    }

    #[test]
    fn test_zero_initial_balance() {
        let settings = RiskSettings::new(0.0, 100.0);
        let state = compute(&trades(&[40.0, -10.0]), &settings);
        assert_eq!(state.high_water_mark, 40.0);
        assert_eq!(state.drawdown_floor, -60.0);
    }

    #[test]
    fn test_pure_and_repeatable() {
        let ts = trades(&[700.0, -300.0, 2_400.0, -1_000.0]);
        assert_eq!(compute(&ts, &settings()), compute(&ts, &settings()));
    }

    #[test]
    fn test_margin_at_external_balance() {
        let state = compute(&trades(&[3_000.0, -3_000.0]), &settings());
        assert_eq!(state.margin_at(50_000.0), 0.0);
        assert!(!state.is_breached_at(50_000.0));
        assert!(state.is_breached_at(49_999.99));
    }

    // ── Daily series ──

    #[test]
    fn test_series_empty() {
        assert!(daily_series(&[], &settings()).is_empty());
    }

    #[test]
    fn test_series_groups_by_date_and_anchors_day_before() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let ts = vec![
            TradeRecord::new(1, day(3), 1_000.0),
            TradeRecord::new(2, day(3), 500.0),
            TradeRecord::new(3, day(4), -700.0),
            TradeRecord::new(4, day(6), 1_800.0),
        ];
        let series = daily_series(&ts, &settings());
        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2), day(3), day(4), day(6)]);

        assert_eq!(series[0].balance, 50_000.0);
        assert_eq!(series[0].drawdown_floor, 47_500.0);
        // 51 500 peak trails
        assert_eq!(series[1].balance, 51_500.0);
        assert_eq!(series[1].drawdown_floor, 49_000.0);
        assert_eq!(series[2].balance, 50_800.0);
        assert_eq!(series[2].drawdown_floor, 49_000.0);
        // 52 600 crosses the threshold
        assert_eq!(series[3].balance, 52_600.0);
        assert_eq!(series[3].drawdown_floor, 50_000.0);
    }

    #[test]
    fn test_series_keeps_intraday_lock() {
        // the threshold is touched mid-day and lost before the close
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let ts = vec![
            TradeRecord::new(1, day, 2_600.0),
            TradeRecord::new(2, day, -2_000.0),
        ];
        let series = daily_series(&ts, &settings());
        let last = series.last().unwrap();
        assert_eq!(last.balance, 50_600.0);
        assert_eq!(last.drawdown_floor, 50_000.0);
    }

    #[test]
    fn test_series_last_point_matches_compute() {
        let ts = trades(&[700.0, -300.0, 2_400.0, -1_000.0]);
        let state = compute(&ts, &settings());
        let last = *daily_series(&ts, &settings()).last().unwrap();
        assert_eq!(last.balance, state.current_balance);
        assert_eq!(last.drawdown_floor, state.drawdown_floor);
    }
}
