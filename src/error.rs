//! Error types for the rebalancing engine.

use std::path::PathBuf;

/// All errors that can occur while setting up the engine.
///
/// Runtime conditions (missing positions, zero-value snapshots, open-order
/// conflicts) are deliberately not represented here: a tick treats them as
/// zero holdings, skips, or defers, and the next scheduled tick is the
/// retry mechanism.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("allocation error: {0}")]
    Allocation(String),

    #[error("failed to read allocation file {path}: {source}")]
    AllocationRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("failed to read snapshot file {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
