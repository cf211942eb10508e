//! Drift detection: has the portfolio wandered off target?

use log::debug;

use crate::allocation::AllocationTable;
use crate::portfolio::PortfolioSnapshot;

/// Default drift threshold: 5% of total portfolio value.
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Whether any position, or idle cash, deviates from target by more than
/// `threshold`.
///
/// Deviations exactly equal to the threshold do not trigger (strict
/// inequality). Evaluation stops at the first violating entry; instruments
/// with no matching position count as zero holdings.
///
/// Precondition: `snapshot.total_value() > 0`. The tick path skips
/// zero-value snapshots before calling this.
pub fn needs_rebalance(
    snapshot: &PortfolioSnapshot,
    allocation: &AllocationTable,
    threshold: f64,
) -> bool {
    let total_value = snapshot.total_value();

    // Too much idle cash is drift on its own, whatever the positions say.
    let cash_fraction = snapshot.cash() / total_value;
    if cash_fraction > threshold {
        debug!("cash fraction {cash_fraction:.4} above threshold {threshold:.4}");
        return true;
    }

    for entry in allocation.entries() {
        let fraction = snapshot.market_value_of(&entry.instrument) / total_value;
        let deviation = (fraction - entry.weight).abs();
        if deviation > threshold {
            debug!(
                "{} at {:.4} vs target {:.4}: deviation {:.4} above threshold {:.4}",
                entry.instrument, fraction, entry.weight, deviation, threshold
            );
            return true;
        }
    }

    false
}
