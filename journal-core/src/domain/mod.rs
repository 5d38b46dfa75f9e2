//! Domain types for the trading journal

pub mod amount;
pub mod ids;
pub mod time;
pub mod trade;

pub use amount::parse_amount;
pub use ids::{GoalId, TradeId};
pub use time::{format_duration, normalize_time, parse_time_of_day};
pub use trade::{Direction, Outcome, TradeRecord};
