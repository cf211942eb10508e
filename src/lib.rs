//! # lazy-rebalancer
//!
//! A threshold-driven periodic rebalancing engine for lazy portfolios.
//!
//! Give it a target allocation (instrument → fraction of total portfolio
//! value) and a cadence; on each evaluation tick it decides whether the
//! live portfolio has drifted far enough from target to act, and if so
//! emits one target-weight [`OrderIntent`] per allocation entry. Market
//! data, order execution, scheduling and symbol resolution belong to the
//! host (a backtester or a live-trading runtime) behind the [`Host`]
//! trait.
//!
//! A tick runs four checks in order, cheapest first: the timing gate
//! (cadence + intraday window), a zero-value guard, the pending-order
//! guard, and finally drift detection. Only when all pass does the engine
//! emit intents and record the rebalance timestamp.
//!
//! ```
//! use chrono::Utc;
//! use lazy_rebalancer::{
//!     AllocationTable, Config, MockHost, PortfolioSnapshot, Rebalancer,
//! };
//!
//! let allocation = AllocationTable::from_json(r#"{
//!     "allocations": [
//!         { "instrument": "VTI", "weight": 0.7 },
//!         { "instrument": "AGG", "weight": 0.3 }
//!     ]
//! }"#).unwrap();
//!
//! let mut engine = Rebalancer::new(allocation, &Config::default()).unwrap();
//! let host = MockHost::builder().build();
//!
//! // Everything sitting in cash: far past the 5% drift threshold.
//! let snapshot = PortfolioSnapshot::new(100_000.0, vec![]);
//! let intents = engine.tick(Utc::now(), &snapshot, &host);
//! assert_eq!(intents.len(), 2);
//! ```

pub mod allocation;
pub mod cadence;
pub mod config;
pub mod drift;
pub mod engine;
pub mod error;
pub mod guard;
pub mod host;
pub mod instrument;
pub mod intent;
pub mod mock;
pub mod portfolio;
pub mod state;

pub use allocation::{AllocationEntry, AllocationTable};
pub use cadence::{Cadence, Granularity, IntradayWindow, SchedulePolicy};
pub use config::Config;
pub use engine::Rebalancer;
pub use error::{Error, Result};
pub use host::{Host, OpenOrder};
pub use instrument::Instrument;
pub use intent::OrderIntent;
pub use mock::MockHost;
pub use portfolio::{PortfolioSnapshot, Position};
pub use state::RebalanceState;
