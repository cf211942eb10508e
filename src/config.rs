//! TOML configuration loading and validation.

use std::path::Path;

use serde::Deserialize;

use crate::cadence::{Cadence, IntradayWindow, SchedulePolicy};
use crate::drift;
use crate::error::{Error, Result};

/// Top-level configuration.
///
/// Every section and field has a default, so an empty file (or no file at
/// all) yields the stock policy: 5% threshold, rebalance at most every 20
/// days, intraday ticks accepted between 10:00 and 15:00.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default = "default_cadence")]
    pub cadence: Cadence,
    #[serde(default)]
    pub intraday: IntradayWindow,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    drift::DEFAULT_THRESHOLD
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_cadence() -> Cadence {
    Cadence::ElapsedDays { days: 20 }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            cadence: default_cadence(),
            intraday: IntradayWindow::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.engine.threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(Error::Config("threshold must be in (0.0, 1.0)".into()));
        }

        match self.cadence {
            Cadence::ElapsedDays { days } => {
                if days < 1 {
                    return Err(Error::Config("cadence days must be >= 1".into()));
                }
            }
            Cadence::CalendarWindow {
                month,
                day_start,
                day_end,
            } => {
                if !(1..=12).contains(&month) {
                    return Err(Error::Config("cadence month must be in 1..=12".into()));
                }
                if day_start < 1 || day_end > 31 || day_start > day_end {
                    return Err(Error::Config(
                        "cadence day window must satisfy 1 <= day_start <= day_end <= 31".into(),
                    ));
                }
            }
        }

        if self.intraday.start_hour > 23 || self.intraday.end_hour > 23 {
            return Err(Error::Config("intraday hours must be in 0..=23".into()));
        }
        if self.intraday.start_hour > self.intraday.end_hour {
            return Err(Error::Config(
                "intraday start_hour must not exceed end_hour".into(),
            ));
        }

        Ok(())
    }

    /// The schedule policy described by this config.
    pub fn schedule_policy(&self) -> SchedulePolicy {
        SchedulePolicy {
            cadence: self.cadence,
            intraday: self.intraday,
        }
    }
}
