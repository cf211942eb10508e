//! Mock host for tests and offline runs.
//!
//! ```
//! use lazy_rebalancer::{Granularity, Instrument, MockHost};
//! use lazy_rebalancer::host::Host;
//!
//! let host = MockHost::builder()
//!     .granularity(Granularity::Intraday)
//!     .with_open_order(Instrument::new("VTI"), 120.0)
//!     .build();
//!
//! assert_eq!(host.open_orders(&Instrument::new("VTI")).len(), 1);
//! assert!(host.open_orders(&Instrument::new("AGG")).is_empty());
//! ```

use crate::cadence::Granularity;
use crate::host::{Host, OpenOrder};
use crate::instrument::Instrument;

/// Builder for [`MockHost`].
pub struct MockHostBuilder {
    granularity: Granularity,
    open_orders: Vec<OpenOrder>,
}

impl MockHostBuilder {
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_open_order(mut self, instrument: Instrument, quantity: f64) -> Self {
        self.open_orders.push(OpenOrder {
            instrument,
            quantity,
        });
        self
    }

    pub fn build(self) -> MockHost {
        MockHost {
            granularity: self.granularity,
            open_orders: self.open_orders,
        }
    }
}

/// A host with a fixed granularity and a fixed set of open orders.
pub struct MockHost {
    granularity: Granularity,
    open_orders: Vec<OpenOrder>,
}

impl MockHost {
    /// Daily granularity, no open orders.
    pub fn builder() -> MockHostBuilder {
        MockHostBuilder {
            granularity: Granularity::Daily,
            open_orders: Vec::new(),
        }
    }
}

impl Host for MockHost {
    fn open_orders(&self, instrument: &Instrument) -> Vec<OpenOrder> {
        self.open_orders
            .iter()
            .filter(|order| order.instrument == *instrument)
            .copied()
            .collect()
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }
}
