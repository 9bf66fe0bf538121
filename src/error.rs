//! # Error Types
//!
//! Per-voxel operations never fail: out-of-range coordinates are ignored and
//! invalid SDF queries read as "outside". Only coarse-grained operations
//! (loading a configuration, running a parallel generation pass) report
//! errors, using the enums below.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`WorldConfig`](crate::config::WorldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read world config {path:?}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid JSON for the expected schema.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A dimension was zero or otherwise unusable.
    #[error("invalid world config: {field} must be {requirement}, got {value}")]
    InvalidDimension {
        /// Name of the offending field
        field: &'static str,
        /// Human readable constraint
        requirement: &'static str,
        /// The rejected value, formatted
        value: String,
    },
}

/// Errors raised by a parallel generation pass.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A generation callback panicked while processing a tile.
    #[error("generation callback panicked in tile starting at ({x}, {z})")]
    WorkerPanicked {
        /// World X of the tile origin
        x: i32,
        /// World Z of the tile origin
        z: i32,
    },

    /// Every worker thread has gone away before the pass finished.
    #[error("worker pool disconnected with {pending} tiles outstanding")]
    PoolDisconnected {
        /// Number of tiles that never reported back
        pending: usize,
    },

    /// SDF generation was requested on a world without an SDF volume.
    #[error("SDF generation requires a world in surface-nets mode")]
    SdfUnavailable,
}

/// Top-level error used by the demo runner.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generation failure
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
