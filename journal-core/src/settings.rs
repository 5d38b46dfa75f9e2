//! Per-account configuration: risk settings and profit goals.
//!
//! An account is described by a TOML file:
//!
//! ```toml
//! name = "Eval 50K"
//!
//! [risk]
//! initial_balance = 50000.0
//! trailing_drawdown_amount = 2500.0
//! consistency_percentage = 40
//!
//! [goals]
//! weekly = 1000.0
//! monthly = 4000.0
//! ```
//!
//! Missing tables fall back to their defaults. Loaded configs are validated
//! before they are handed back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rejected settings values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("initial balance must be >= 0 (got {0})")]
    InvalidInitialBalance(f64),

    #[error("trailing drawdown amount must be > 0 (got {0})")]
    InvalidTrailingDrawdown(f64),

    #[error("consistency percentage must be between 1 and 100 (got {0})")]
    InvalidConsistencyPercentage(u32),

    #[error("{period} goal must be >= 0 (got {value})")]
    InvalidGoal { period: &'static str, value: f64 },
}

/// Failure to load an account config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] SettingsError),
}

/// Risk parameters of a funded or evaluation account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Starting capital.
    pub initial_balance: f64,
    /// Fixed distance the drawdown floor trails below the peak balance.
    pub trailing_drawdown_amount: f64,
    /// Maximum share (percent) of positive-day profit a single day may hold.
    pub consistency_percentage: u32,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            initial_balance: 50_000.0,
            trailing_drawdown_amount: 2_500.0,
            consistency_percentage: 40,
        }
    }
}

impl RiskSettings {
    pub fn new(initial_balance: f64, trailing_drawdown_amount: f64) -> Self {
        Self {
            initial_balance,
            trailing_drawdown_amount,
            ..Self::default()
        }
    }

    pub fn with_consistency(mut self, percentage: u32) -> Self {
        self.consistency_percentage = percentage;
        self
    }

    /// Peak balance at which the floor locks at breakeven.
    pub fn buffer_threshold(&self) -> f64 {
        self.initial_balance + self.trailing_drawdown_amount
    }

    /// Lowest level the floor can ever sit at.
    pub fn base_floor(&self) -> f64 {
        self.initial_balance - self.trailing_drawdown_amount
    }

    /// NaN and infinite amounts fail validation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.initial_balance.is_finite() || self.initial_balance < 0.0 {
            return Err(SettingsError::InvalidInitialBalance(self.initial_balance));
        }
        if !self.trailing_drawdown_amount.is_finite() || self.trailing_drawdown_amount <= 0.0 {
            return Err(SettingsError::InvalidTrailingDrawdown(
                self.trailing_drawdown_amount,
            ));
        }
        if !(1..=100).contains(&self.consistency_percentage) {
            return Err(SettingsError::InvalidConsistencyPercentage(
                self.consistency_percentage,
            ));
        }
        Ok(())
    }
}

/// Weekly and monthly profit targets. Zero means "no goal set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub weekly: f64,
    pub monthly: f64,
}

impl Goals {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (period, value) in [("weekly", self.weekly), ("monthly", self.monthly)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidGoal { period, value });
            }
        }
        Ok(())
    }
}

/// Everything configurable about one account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub name: Option<String>,
    pub risk: RiskSettings,
    pub goals: Goals,
}

impl AccountConfig {
    /// Load and validate an account config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate an account config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.risk.validate()?;
        self.goals.validate()
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
