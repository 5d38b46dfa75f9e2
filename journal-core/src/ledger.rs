//! TradeLog: the account's trades, always in chronological order.
//!
//! Every mutation keeps the records sorted by `(date, entry_time)` so the
//! slice handed to the accounting rules never needs re-sorting. Records with
//! equal keys keep insertion order; an edited record moves behind its peers.

use crate::domain::{TradeId, TradeRecord};
use crate::drawdown::{self, DrawdownState, EquityPoint};
use crate::filter::TradeFilter;
use crate::settings::RiskSettings;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("trade {0} already exists")]
    DuplicateId(TradeId),

    #[error("trade {0} not found")]
    NotFound(TradeId),
}

/// Serializes as a plain array. Load through [`TradeLog::from_records`],
/// which sorts and checks ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from records in any order. Ids must be unique.
    pub fn from_records(mut records: Vec<TradeRecord>) -> Result<Self, LedgerError> {
        let mut seen = std::collections::HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(LedgerError::DuplicateId(record.id));
            }
        }
        records.sort_by_key(TradeRecord::sort_key);
        tracing::debug!(trades = records.len(), "trade log loaded");
        Ok(Self { records })
    }

    /// Insert a new record at its chronological position.
    pub fn add(&mut self, record: TradeRecord) -> Result<(), LedgerError> {
        if self.position(record.id).is_some() {
            return Err(LedgerError::DuplicateId(record.id));
        }
        tracing::debug!(id = %record.id, date = %record.date, "trade added");
        self.insert_sorted(record);
        Ok(())
    }

    /// Replace the record with the same id, re-sorting if its date or entry
    /// time changed. Returns the previous version.
    pub fn replace(&mut self, record: TradeRecord) -> Result<TradeRecord, LedgerError> {
        let idx = self
            .position(record.id)
            .ok_or(LedgerError::NotFound(record.id))?;
        let previous = self.records.remove(idx);
        tracing::debug!(id = %record.id, "trade edited");
        self.insert_sorted(record);
        Ok(previous)
    }

    pub fn remove(&mut self, id: TradeId) -> Result<TradeRecord, LedgerError> {
        let idx = self.position(id).ok_or(LedgerError::NotFound(id))?;
        tracing::debug!(id = %id, "trade deleted");
        Ok(self.records.remove(idx))
    }

    /// Drop every record (account reset).
    pub fn clear(&mut self) {
        tracing::debug!(trades = self.records.len(), "trade log cleared");
        self.records.clear();
    }

    pub fn get(&self, id: TradeId) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Sorted snapshot.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last `n` trades, newest first.
    pub fn recent(&self, n: usize) -> Vec<&TradeRecord> {
        self.records.iter().rev().take(n).collect()
    }

    /// Sum of all contributions.
    pub fn total_pnl(&self) -> f64 {
        self.records.iter().map(TradeRecord::contribution).sum()
    }

    pub fn drawdown(&self, settings: &RiskSettings) -> DrawdownState {
        drawdown::compute(&self.records, settings)
    }

    /// End-of-day balance and floor over the sorted snapshot.
    pub fn equity_series(&self, settings: &RiskSettings) -> Vec<EquityPoint> {
        drawdown::daily_series(&self.records, settings)
    }

    /// Matching trades in chronological order.
    pub fn filter(&self, filter: &TradeFilter) -> Vec<&TradeRecord> {
        filter.apply(&self.records)
    }

    fn position(&self, id: TradeId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn insert_sorted(&mut self, record: TradeRecord) {
        let key = record.sort_key();
        let idx = self.records.partition_point(|r| r.sort_key() <= key);
        self.records.insert(idx, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn at(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn ids(log: &TradeLog) -> Vec<u64> {
        log.records().iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn from_records_sorts_by_date_then_entry_time() {
        let log = TradeLog::from_records(vec![
            TradeRecord::new(1, day(3), 10.0),
            TradeRecord::new(2, day(2), 10.0).with_times(at(14, 0), None),
            TradeRecord::new(3, day(2), 10.0).with_times(at(9, 30), None),
            TradeRecord::new(4, day(2), 10.0),
        ])
        .unwrap();
        // no entry time sorts as midnight
        assert_eq!(ids(&log), vec![4, 3, 2, 1]);
    }

    #[test]
    fn from_records_rejects_duplicate_ids() {
        let err = TradeLog::from_records(vec![
            TradeRecord::new(7, day(1), 1.0),
            TradeRecord::new(7, day(2), 2.0),
        ])
        .unwrap_err();
        assert_eq!(err, LedgerError::DuplicateId(TradeId(7)));
    }

    #[test]
    fn add_inserts_in_order_and_keeps_ties_stable() {
        let mut log = TradeLog::new();
        log.add(TradeRecord::new(1, day(5), 1.0)).unwrap();
        log.add(TradeRecord::new(2, day(3), 1.0)).unwrap();
        log.add(TradeRecord::new(3, day(5), 1.0)).unwrap();
        log.add(TradeRecord::new(4, day(4), 1.0)).unwrap();
        assert_eq!(ids(&log), vec![2, 4, 1, 3]);

        assert_eq!(
            log.add(TradeRecord::new(3, day(1), 1.0)),
            Err(LedgerError::DuplicateId(TradeId(3)))
        );
    }

    #[test]
    fn replace_moves_edited_record() {
        let mut log = TradeLog::from_records(vec![
            TradeRecord::new(1, day(1), 100.0),
            TradeRecord::new(2, day(2), 200.0),
            TradeRecord::new(3, day(3), 300.0),
        ])
        .unwrap();

        let previous = log.replace(TradeRecord::new(1, day(4), -50.0)).unwrap();
        assert_eq!(previous.contribution(), 100.0);
        assert_eq!(ids(&log), vec![2, 3, 1]);
        assert_eq!(log.get(TradeId(1)).unwrap().contribution(), -50.0);

        assert_eq!(
            log.replace(TradeRecord::new(99, day(1), 0.0)),
            Err(LedgerError::NotFound(TradeId(99)))
        );
    }

    #[test]
    fn remove_and_clear() {
        let mut log = TradeLog::from_records(vec![
            TradeRecord::new(1, day(1), 100.0),
            TradeRecord::new(2, day(2), 200.0),
        ])
        .unwrap();

        let removed = log.remove(TradeId(1)).unwrap();
        assert_eq!(removed.id, TradeId(1));
        assert_eq!(log.len(), 1);
        assert_eq!(log.remove(TradeId(1)), Err(LedgerError::NotFound(TradeId(1))));

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn recent_is_newest_first() {
        let log = TradeLog::from_records(
            (1..=7).map(|i| TradeRecord::new(i, day(i as u32), 1.0)).collect(),
        )
        .unwrap();
        let recent: Vec<u64> = log.recent(5).iter().map(|r| r.id.0).collect();
        assert_eq!(recent, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn drawdown_follows_mutations() {
        let settings = RiskSettings::new(50_000.0, 2_500.0);
        let mut log = TradeLog::new();
        assert_eq!(log.drawdown(&settings).drawdown_floor, 47_500.0);

        log.add(TradeRecord::new(1, day(1), 1_000.0)).unwrap();
        assert_eq!(log.drawdown(&settings).drawdown_floor, 48_500.0);

        log.add(TradeRecord::new(2, day(2), 2_000.0)).unwrap();
        assert_eq!(log.drawdown(&settings).drawdown_floor, 50_000.0);

        // deleting the winner unlocks the floor again
        log.remove(TradeId(2)).unwrap();
        assert_eq!(log.drawdown(&settings).drawdown_floor, 48_500.0);
        assert_eq!(log.total_pnl(), 1_000.0);
    }

    #[test]
    fn filter_and_series_use_sorted_order() {
        let settings = RiskSettings::new(50_000.0, 2_500.0);
        let log = TradeLog::from_records(vec![
            TradeRecord::new(1, day(9), -200.0),
            TradeRecord::new(2, day(2), 300.0),
            TradeRecord::new(3, day(5), 100.0),
        ])
        .unwrap();

        let wins = TradeFilter {
            result: Some(crate::domain::Outcome::Win),
            ..Default::default()
        };
        let ids: Vec<u64> = log.filter(&wins).iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3]);

        let balances: Vec<f64> = log.equity_series(&settings).iter().map(|p| p.balance).collect();
        assert_eq!(balances, vec![50_000.0, 50_300.0, 50_400.0, 50_200.0]);
    }

    #[test]
    fn serializes_as_plain_array() {
        let log = TradeLog::from_records(vec![TradeRecord::new(1, day(1), 5.0)]).unwrap();
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
    }
}
