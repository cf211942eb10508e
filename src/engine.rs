//! The rebalancing engine: per-tick decision flow.

use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn};

use crate::allocation::AllocationTable;
use crate::cadence::SchedulePolicy;
use crate::config::Config;
use crate::drift;
use crate::error::Result;
use crate::guard;
use crate::host::Host;
use crate::instrument::Instrument;
use crate::intent::{self, OrderIntent};
use crate::portfolio::PortfolioSnapshot;
use crate::state::RebalanceState;

/// Periodic rebalancing decision engine.
///
/// Hosts build one per strategy at startup, then call [`Rebalancer::tick`]
/// once per scheduled evaluation point with the current time and a fresh
/// portfolio snapshot. Ticks are serialized by the host; nothing in here
/// blocks, suspends, or retries.
pub struct Rebalancer {
    allocation: AllocationTable,
    instruments: Vec<Instrument>,
    policy: SchedulePolicy,
    threshold: f64,
    state: RebalanceState,
}

impl Rebalancer {
    /// Build an engine from a validated allocation table and configuration.
    ///
    /// Configuration errors are fatal here; nothing starts half-configured.
    pub fn new(allocation: AllocationTable, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instruments: allocation.instruments(),
            allocation,
            policy: config.schedule_policy(),
            threshold: config.engine.threshold,
            state: RebalanceState::new(),
        })
    }

    /// Restore the last-rebalance timestamp, for hosts that persist engine
    /// state across restarts.
    pub fn restore_last_rebalance(&mut self, ts: DateTime<Utc>) {
        self.state.record(ts);
    }

    /// Timestamp of the last issued rebalance, if any.
    pub fn last_rebalance(&self) -> Option<DateTime<Utc>> {
        self.state.last_rebalance()
    }

    /// The allocation this engine rebalances toward.
    pub fn allocation(&self) -> &AllocationTable {
        &self.allocation
    }

    /// Evaluate one tick.
    ///
    /// `now` should be exchange-local time; the calendar and intraday
    /// checks read month, day and hour in its timezone. Returns the order
    /// intents to hand to the host, or an empty vector when no rebalance
    /// is due.
    pub fn tick<Tz: TimeZone>(
        &mut self,
        now: DateTime<Tz>,
        snapshot: &PortfolioSnapshot,
        host: &dyn Host,
    ) -> Vec<OrderIntent> {
        // Cheapest check first; most ticks fail it.
        if !self
            .policy
            .is_eligible(&now, &self.state, host.granularity())
        {
            return Vec::new();
        }

        // Fractions are meaningless on a zero-value book.
        if snapshot.total_value() <= 0.0 {
            warn!("portfolio value is zero; skipping tick");
            return Vec::new();
        }

        if guard::has_open_orders(host, &self.instruments) {
            info!("open orders outstanding; deferring rebalance");
            return Vec::new();
        }

        if !drift::needs_rebalance(snapshot, &self.allocation, self.threshold) {
            return Vec::new();
        }

        let intents = intent::target_weight_intents(&self.allocation);

        // Recorded on emission, not on fill: fills are asynchronous, so a
        // failed fill waits out a full cadence period before the next try.
        let ts = now.with_timezone(&Utc);
        self.state.record(ts);
        info!("rebalanced at {ts}");

        intents
    }
}
