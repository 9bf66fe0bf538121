//! # World Configuration
//!
//! A `WorldConfig` describes the fixed dimensions of a voxel world and which
//! meshing backend it feeds. Configurations are plain JSON documents; any
//! field left out takes its default value.
//!
//! ```json
//! {
//!     "chunk_size": 16,
//!     "world_size_x": 4,
//!     "world_size_z": 4,
//!     "max_height": 64,
//!     "voxel_size": 1.0,
//!     "mode": "surface_nets",
//!     "seed": 7
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::engine_state::voxels::world::{MeshingMode, WorldDimensions};
use crate::error::ConfigError;

/// Deserializable description of a voxel world.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Width and depth of a chunk in voxels
    pub chunk_size: usize,
    /// Number of chunks along X
    pub world_size_x: usize,
    /// Number of chunks along Z
    pub world_size_z: usize,
    /// Number of voxel layers along Y
    pub max_height: usize,
    /// Edge length of a voxel in world units
    pub voxel_size: f32,
    /// Which mesh backend the world is built for
    pub mode: MeshingMode,
    /// Seed for the demo terrain generator
    pub seed: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunk_size: 16,
            world_size_x: 4,
            world_size_z: 4,
            max_height: 64,
            voxel_size: 1.0,
            mode: MeshingMode::Instanced,
            seed: 0,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Checks that every dimension is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("chunk_size", self.chunk_size),
            ("world_size_x", self.world_size_x),
            ("world_size_z", self.world_size_z),
            ("max_height", self.max_height),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidDimension {
                    field,
                    requirement: "greater than zero",
                    value: value.to_string(),
                });
            }
        }

        if !(self.voxel_size.is_finite() && self.voxel_size > 0.0) {
            return Err(ConfigError::InvalidDimension {
                field: "voxel_size",
                requirement: "a finite positive number",
                value: self.voxel_size.to_string(),
            });
        }

        Ok(())
    }

    /// The world dimensions this configuration describes.
    pub fn dimensions(&self) -> WorldDimensions {
        WorldDimensions {
            chunk_size: self.chunk_size,
            world_size_x: self.world_size_x,
            world_size_z: self.world_size_z,
            max_height: self.max_height,
            voxel_size: self.voxel_size,
        }
    }
}
