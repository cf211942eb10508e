//! Pending-order guard: defer rebalancing while orders are still resolving.

use log::info;

use crate::host::{Host, OpenOrder};
use crate::instrument::Instrument;

/// Collect every unresolved order the host reports for `instruments`.
///
/// The sweep covers all instruments even after the first finding, so the
/// diagnostics below list every outstanding order rather than just the
/// first one.
pub fn collect_open_orders(host: &dyn Host, instruments: &[Instrument]) -> Vec<OpenOrder> {
    let mut open = Vec::new();
    for instrument in instruments {
        open.extend(host.open_orders(instrument));
    }
    open
}

/// True if any allocation instrument has an unresolved order outstanding.
///
/// Logs one line per open order found. A fresh target-weight order placed
/// while a prior one is still resolving risks duplicate execution, so a
/// single open order defers the whole rebalance.
pub fn has_open_orders(host: &dyn Host, instruments: &[Instrument]) -> bool {
    let open = collect_open_orders(host, instruments);
    for order in &open {
        info!(
            "open order for {} shares in {}",
            order.quantity, order.instrument
        );
    }
    !open.is_empty()
}
