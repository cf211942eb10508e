//! Target allocation loading and validation.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::instrument::Instrument;

/// One allocation entry: an instrument and its target fraction of total
/// portfolio value.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AllocationEntry {
    pub instrument: Instrument,
    pub weight: f64,
}

/// The target allocation for a strategy.
///
/// A fixed, ordered set of (instrument, weight) pairs, resolved once at
/// initialization and immutable afterwards. Weights sum to at most 1.0;
/// whatever is left over is held as cash.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationTable {
    allocations: Vec<AllocationEntry>,
}

impl AllocationTable {
    /// Build and validate a table from entries.
    pub fn new(entries: Vec<AllocationEntry>) -> Result<Self> {
        let table = Self {
            allocations: entries,
        };
        table.validate()?;
        Ok(table)
    }

    /// Load and validate an allocation JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::AllocationRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: AllocationTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Validate the table invariants.
    fn validate(&self) -> Result<()> {
        if self.allocations.is_empty() {
            return Err(Error::Allocation("allocation table is empty".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.allocations {
            if !seen.insert(entry.instrument) {
                return Err(Error::Allocation(format!(
                    "duplicate instrument: {}",
                    entry.instrument
                )));
            }
        }

        // Long-only: every weight strictly positive, none above 1.0.
        for entry in &self.allocations {
            if !entry.weight.is_finite() {
                return Err(Error::Allocation(format!(
                    "weight for {} is not finite",
                    entry.instrument
                )));
            }
            if entry.weight <= 0.0 {
                return Err(Error::Allocation(format!(
                    "weight for {} ({}) must be positive; omit the entry instead",
                    entry.instrument, entry.weight
                )));
            }
            if entry.weight > 1.0 {
                return Err(Error::Allocation(format!(
                    "weight for {} ({}) exceeds 1.0",
                    entry.instrument, entry.weight
                )));
            }
        }

        // Small slack so decimal tables summing to exactly 1.0 survive
        // float addition.
        let total = self.invested_weight();
        if total > 1.0 + 1e-9 {
            return Err(Error::Allocation(format!(
                "weights sum to {total:.4} (> 1.0)"
            )));
        }

        Ok(())
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[AllocationEntry] {
        &self.allocations
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Always false for a validated table; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Instruments in table order.
    pub fn instruments(&self) -> Vec<Instrument> {
        self.allocations.iter().map(|e| e.instrument).collect()
    }

    /// Total fraction of portfolio value assigned to instruments.
    pub fn invested_weight(&self) -> f64 {
        self.allocations.iter().map(|e| e.weight).sum()
    }

    /// Fraction of portfolio value left in cash.
    pub fn cash_weight(&self) -> f64 {
        (1.0 - self.invested_weight()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swensen_json() -> &'static str {
        r#"{
            "allocations": [
                { "instrument": "TIP", "weight": 0.15 },
                { "instrument": "TLT", "weight": 0.15 },
                { "instrument": "VNQ", "weight": 0.15 },
                { "instrument": "EEM", "weight": 0.10 },
                { "instrument": "EFA", "weight": 0.15 },
                { "instrument": "VTI", "weight": 0.30 }
            ]
        }"#
    }

    #[test]
    fn parse_valid_table() {
        let table = AllocationTable::from_json(swensen_json()).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.entries()[0].instrument, Instrument::new("TIP"));
        assert_eq!(table.entries()[5].weight, 0.30);
    }

    #[test]
    fn fully_invested_table_is_accepted() {
        // Decimal weights summing to exactly 1.0 must not trip the sum check.
        let table = AllocationTable::from_json(swensen_json()).unwrap();
        assert!(table.cash_weight() < 1e-9);
    }

    #[test]
    fn instruments_in_table_order() {
        let table = AllocationTable::from_json(swensen_json()).unwrap();
        let instruments = table.instruments();
        assert_eq!(instruments[0], Instrument::new("TIP"));
        assert_eq!(instruments[5], Instrument::new("VTI"));
    }

    #[test]
    fn partial_allocation_leaves_cash() {
        let json = r#"{
            "allocations": [
                { "instrument": "VTI", "weight": 0.7 },
                { "instrument": "AGG", "weight": 0.2 }
            ]
        }"#;
        let table = AllocationTable::from_json(json).unwrap();
        assert!((table.invested_weight() - 0.9).abs() < 1e-12);
        assert!((table.cash_weight() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn reject_empty_table() {
        let json = r#"{"allocations":[]}"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn reject_duplicate_instrument() {
        let json = r#"{
            "allocations": [
                { "instrument": "VTI", "weight": 0.5 },
                { "instrument": "VTI", "weight": 0.3 }
            ]
        }"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn reject_zero_weight() {
        let json = r#"{
            "allocations": [ { "instrument": "VTI", "weight": 0.0 } ]
        }"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn reject_negative_weight() {
        let json = r#"{
            "allocations": [ { "instrument": "SPY", "weight": -0.2 } ]
        }"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn reject_weight_over_one() {
        let json = r#"{
            "allocations": [ { "instrument": "SPY", "weight": 1.5 } ]
        }"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn reject_sum_over_one() {
        let json = r#"{
            "allocations": [
                { "instrument": "VTI", "weight": 0.6 },
                { "instrument": "AGG", "weight": 0.5 }
            ]
        }"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn reject_long_ticker() {
        let json = r#"{
            "allocations": [ { "instrument": "TOOLONGNAME", "weight": 0.5 } ]
        }"#;
        assert!(AllocationTable::from_json(json).is_err());
    }

    #[test]
    fn load_from_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allocation.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(swensen_json().as_bytes()).unwrap();

        let table = AllocationTable::load(&path).unwrap();
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = AllocationTable::load(Path::new("/nonexistent/alloc.json")).unwrap_err();
        assert!(matches!(err, Error::AllocationRead { .. }));
    }
}
