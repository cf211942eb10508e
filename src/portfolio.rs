//! Host-owned portfolio snapshot passed to the engine each tick.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::instrument::Instrument;

/// A holding in a single instrument, marked at the host's last price.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub instrument: Instrument,
    pub quantity: f64,
    pub last_price: f64,
}

impl Position {
    /// Market value at the last price.
    #[inline]
    pub fn market_value(&self) -> f64 {
        self.quantity * self.last_price
    }
}

/// Point-in-time view of the portfolio: cash plus marked positions.
///
/// Owned by the host and rebuilt every tick; the engine only reads it.
/// Total value and the per-instrument value index are computed once at
/// construction.
#[derive(Debug, Clone)]
pub struct PortfolioSnapshot {
    cash: f64,
    positions: Vec<Position>,
    total_value: f64,
    value_by_instrument: FxHashMap<Instrument, f64>,
}

impl PortfolioSnapshot {
    /// Build a snapshot from cash and positions.
    ///
    /// Multiple positions in the same instrument are summed.
    pub fn new(cash: f64, positions: Vec<Position>) -> Self {
        let mut value_by_instrument = FxHashMap::default();
        let mut total_value = cash;
        for position in &positions {
            let value = position.market_value();
            total_value += value;
            *value_by_instrument.entry(position.instrument).or_insert(0.0) += value;
        }
        Self {
            cash,
            positions,
            total_value,
            value_by_instrument,
        }
    }

    /// Uninvested cash.
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Cash plus the market value of every position.
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Fraction of total value sitting idle as cash.
    ///
    /// Precondition: `total_value() > 0`.
    pub fn cash_fraction(&self) -> f64 {
        self.cash / self.total_value
    }

    /// Market value held in `instrument`, or 0.0 when there is no position.
    pub fn market_value_of(&self, instrument: &Instrument) -> f64 {
        self.value_by_instrument
            .get(instrument)
            .copied()
            .unwrap_or(0.0)
    }

    /// The positions as supplied by the host.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}
