use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque trade identifier, assigned once at creation and used to match
/// edits and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub u64);

impl TradeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for TradeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a journal goal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub u64);

impl From<u64> for GoalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&TradeId(1717171717)).unwrap();
        assert_eq!(json, "1717171717");
        let back: TradeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TradeId::new(1717171717));
    }

    #[test]
    fn trade_id_display() {
        assert_eq!(TradeId::from(42).to_string(), "42");
        assert_eq!(GoalId::from(7).to_string(), "7");
    }
}
