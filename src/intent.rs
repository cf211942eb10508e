//! Order intents emitted on a rebalance.

use std::fmt;

use serde::Serialize;

use crate::allocation::AllocationTable;
use crate::instrument::Instrument;

/// A declarative instruction to the host: bring `instrument`'s holding to
/// `target_weight` of current total portfolio value.
///
/// Share quantities, order types and routing are the host's concern. Hosts
/// should work sell-side intents before buy-side ones so overweight
/// positions free cash for the buys; the engine declares that preference
/// but leaves execution ordering to the host, since fills are asynchronous
/// anyway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderIntent {
    pub instrument: Instrument,
    pub target_weight: f64,
}

impl fmt::Display for OrderIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target {} at {:.2}% of portfolio value",
            self.instrument,
            self.target_weight * 100.0
        )
    }
}

/// One intent per allocation entry, in table order.
///
/// Emission is unconditional: entries already at target produce no-op
/// intents rather than being suppressed.
pub fn target_weight_intents(allocation: &AllocationTable) -> Vec<OrderIntent> {
    allocation
        .entries()
        .iter()
        .map(|entry| OrderIntent {
            instrument: entry.instrument,
            target_weight: entry.weight,
        })
        .collect()
}
