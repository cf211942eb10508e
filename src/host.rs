//! The seam between the engine and its backtesting/live-trading host.

use serde::Deserialize;

use crate::cadence::Granularity;
use crate::instrument::Instrument;

/// An unresolved order as reported by the host.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpenOrder {
    pub instrument: Instrument,
    /// Remaining unfilled quantity, signed (negative = sell).
    pub quantity: f64,
}

/// Queries the host answers during a tick.
///
/// Everything is synchronous and returns immediately; the engine never
/// blocks on the host. Ticks themselves are serialized by the host, so
/// implementations need no interior locking for the engine's sake.
pub trait Host {
    /// Unresolved orders outstanding against `instrument`.
    fn open_orders(&self, instrument: &Instrument) -> Vec<OpenOrder>;

    /// The host's current evaluation granularity.
    fn granularity(&self) -> Granularity;
}
