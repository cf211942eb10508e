//! Engine-owned rebalance state.

use chrono::{DateTime, Utc};
use log::warn;

/// The engine's only mutable state: when the last rebalance was issued.
///
/// Unset until the first rebalance. The recorded timestamp never moves
/// backwards.
#[derive(Debug, Clone, Default)]
pub struct RebalanceState {
    last_rebalance: Option<DateTime<Utc>>,
}

impl RebalanceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the last issued rebalance, if any.
    pub fn last_rebalance(&self) -> Option<DateTime<Utc>> {
        self.last_rebalance
    }

    /// Record a rebalance at `ts`.
    ///
    /// A timestamp earlier than the recorded one is ignored (and logged),
    /// keeping the state monotonically non-decreasing.
    pub fn record(&mut self, ts: DateTime<Utc>) {
        match self.last_rebalance {
            Some(last) if ts < last => {
                warn!("rebalance timestamp {ts} precedes recorded {last}; keeping {last}");
            }
            _ => self.last_rebalance = Some(ts),
        }
    }
}
