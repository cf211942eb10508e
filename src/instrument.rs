//! Instrument identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque identifier for a tradable security.
///
/// Tickers are stored inline as up to 8 bytes, so `Instrument` is `Copy`
/// and cheap to use as a hash-map key. Immutable once constructed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instrument {
    bytes: [u8; Self::MAX_LEN],
    len: u8,
}

impl Instrument {
    /// Maximum ticker length in bytes.
    pub const MAX_LEN: usize = 8;

    /// Create an instrument from a ticker.
    ///
    /// # Panics
    ///
    /// Panics if `ticker` is empty or longer than [`Instrument::MAX_LEN`]
    /// bytes. Validated input paths (allocation and snapshot files) check
    /// length first and report a proper error instead.
    pub fn new(ticker: &str) -> Self {
        match Self::try_new(ticker) {
            Some(instrument) => instrument,
            None => panic!("invalid instrument ticker: {ticker:?}"),
        }
    }

    /// Create an instrument, or `None` if the ticker is empty or too long.
    pub fn try_new(ticker: &str) -> Option<Self> {
        if ticker.is_empty() || ticker.len() > Self::MAX_LEN {
            return None;
        }
        let mut bytes = [0u8; Self::MAX_LEN];
        bytes[..ticker.len()].copy_from_slice(ticker.as_bytes());
        Some(Self {
            bytes,
            len: ticker.len() as u8,
        })
    }

    /// The ticker as a string slice.
    pub fn as_str(&self) -> &str {
        // The bytes are copied whole from a &str, so they stay valid UTF-8.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instrument({})", self.as_str())
    }
}

impl Serialize for Instrument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Instrument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ticker = String::deserialize(deserializer)?;
        Instrument::try_new(&ticker).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "instrument '{ticker}' must be 1..={} bytes",
                Instrument::MAX_LEN
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ticker() {
        let vti = Instrument::new("VTI");
        assert_eq!(vti.as_str(), "VTI");
        assert_eq!(format!("{vti}"), "VTI");
    }

    #[test]
    fn display_pads() {
        assert_eq!(format!("{:8}|", Instrument::new("EEM")), "EEM     |");
    }

    #[test]
    fn rejects_empty_and_long() {
        assert!(Instrument::try_new("").is_none());
        assert!(Instrument::try_new("TOOLONGNAME").is_none());
        assert!(Instrument::try_new("ABCDEFGH").is_some()); // exactly 8
    }

    #[test]
    fn equality_and_hashing() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Instrument::new("TLT"));
        assert!(set.contains(&Instrument::new("TLT")));
        assert!(!set.contains(&Instrument::new("TIP")));
    }

    #[test]
    fn serde_as_plain_string() {
        let json = serde_json::to_string(&Instrument::new("AGG")).unwrap();
        assert_eq!(json, "\"AGG\"");

        let back: Instrument = serde_json::from_str("\"SPY\"").unwrap();
        assert_eq!(back, Instrument::new("SPY"));
    }

    #[test]
    fn serde_rejects_long_ticker() {
        let result: Result<Instrument, _> = serde_json::from_str("\"TOOLONGNAME\"");
        assert!(result.is_err());
    }
}
