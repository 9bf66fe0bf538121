//! # World Module
//!
//! This module provides the `VoxelWorld` struct which owns every chunk of a
//! fixed-size voxel world, and, for the heightfield backend, a dense signed
//! distance field over the same extent.
//!
//! ## Architecture
//!
//! The world is a dense `world_size_x × world_size_z` grid of chunks allocated
//! once at construction. World coordinates resolve to a chunk and a local cell
//! by integer division and modulo, so every lookup is O(1).
//!
//! ## Boundary Policy
//!
//! Nothing on the per-voxel path fails. Writes outside the world are dropped,
//! reads outside the world return air (or "outside" for the SDF), and
//! solidity tests outside the world return `false` so that world edges behave
//! as open air during face culling.

use cgmath::{Point2, Point3};
use serde::Deserialize;

use super::block::{VoxelId, AIR_ID};
use super::chunk::Chunk;
use super::sdf::{SdfVolume, SDF_OUTSIDE};
use crate::config::WorldConfig;
use crate::engine_state::rendering::Geometry;
use crate::error::ConfigError;

/// Which mesh backend a world is built for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshingMode {
    /// One instanced primitive per visible voxel.
    #[default]
    Instanced,
    /// A heightfield extracted from the SDF volume.
    SurfaceNets,
}

/// The fixed dimensions of a world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldDimensions {
    /// Width and depth of a chunk in voxels
    pub chunk_size: usize,
    /// Number of chunks along X
    pub world_size_x: usize,
    /// Number of chunks along Z
    pub world_size_z: usize,
    /// Number of voxel layers
    pub max_height: usize,
    /// Edge length of a voxel in world units
    pub voxel_size: f32,
}

impl WorldDimensions {
    /// Number of voxel columns along X.
    #[inline]
    pub fn extent_x(&self) -> usize {
        self.world_size_x * self.chunk_size
    }

    /// Number of voxel columns along Z.
    #[inline]
    pub fn extent_z(&self) -> usize {
        self.world_size_z * self.chunk_size
    }

    /// Total number of voxel columns.
    pub fn column_count(&self) -> usize {
        self.extent_x() * self.extent_z()
    }

    /// Whether a world coordinate lies inside the world.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.extent_x()
            && (y as usize) < self.max_height
            && (z as usize) < self.extent_z()
    }

    /// World-space position of a voxel coordinate.
    #[inline]
    pub fn world_position(&self, x: i32, y: i32, z: i32) -> Point3<f32> {
        Point3::new(
            x as f32 * self.voxel_size,
            y as f32 * self.voxel_size,
            z as f32 * self.voxel_size,
        )
    }
}

/// A chunked voxel world of fixed size.
///
/// # Examples
///
/// ```
/// use voxel_world::{Geometry, MeshingMode, VoxelWorld, WorldDimensions};
///
/// let dimensions = WorldDimensions {
///     chunk_size: 16,
///     world_size_x: 2,
///     world_size_z: 2,
///     max_height: 32,
///     voxel_size: 1.0,
/// };
/// let mut world = VoxelWorld::new(dimensions, Geometry::cube(), MeshingMode::Instanced);
///
/// world.set_voxel(3, 4, 5, 2);
/// assert_eq!(world.get_voxel(3, 4, 5), 2);
/// assert_eq!(world.active_voxels(), 1);
/// ```
pub struct VoxelWorld {
    dimensions: WorldDimensions,
    mode: MeshingMode,
    /// Chunks indexed `cx + cz * world_size_x`.
    chunks: Vec<Chunk>,
    /// Number of active cells across all chunks.
    active_voxels: usize,
    /// Primitive stamped once per visible voxel in instanced mode.
    geometry: Geometry,
    /// Present only in surface-nets mode.
    sdf: Option<SdfVolume>,
}

impl VoxelWorld {
    /// Creates an empty world, preallocating every chunk.
    ///
    /// In [`MeshingMode::SurfaceNets`] the SDF volume is allocated as well and
    /// filled with "outside".
    pub fn new(dimensions: WorldDimensions, geometry: Geometry, mode: MeshingMode) -> Self {
        let mut chunks = Vec::with_capacity(dimensions.world_size_x * dimensions.world_size_z);
        for cz in 0..dimensions.world_size_z {
            for cx in 0..dimensions.world_size_x {
                chunks.push(Chunk::empty(
                    Point2::new(cx as i32, cz as i32),
                    dimensions.chunk_size,
                    dimensions.max_height,
                ));
            }
        }

        let sdf = match mode {
            MeshingMode::SurfaceNets => Some(SdfVolume::new(
                dimensions.extent_x(),
                dimensions.max_height,
                dimensions.extent_z(),
            )),
            MeshingMode::Instanced => None,
        };

        log::debug!(
            "Allocated {} chunks ({}x{}x{} voxels) in {:?} mode",
            chunks.len(),
            dimensions.extent_x(),
            dimensions.max_height,
            dimensions.extent_z(),
            mode
        );

        VoxelWorld {
            dimensions,
            mode,
            chunks,
            active_voxels: 0,
            geometry,
            sdf,
        }
    }

    /// Creates a world from a validated configuration.
    pub fn from_config(config: &WorldConfig, geometry: Geometry) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.dimensions(), geometry, config.mode))
    }

    /// The world's fixed dimensions.
    #[inline]
    pub fn dimensions(&self) -> &WorldDimensions {
        &self.dimensions
    }

    /// The mesh backend this world was built for.
    #[inline]
    pub fn mode(&self) -> MeshingMode {
        self.mode
    }

    /// Number of active voxels in the world.
    #[inline]
    pub fn active_voxels(&self) -> usize {
        self.active_voxels
    }

    /// The primitive stamped per instance.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Resolves a world coordinate to `(chunk index, local x, y, local z)`.
    #[inline]
    fn resolve(&self, x: i32, y: i32, z: i32) -> Option<(usize, usize, usize, usize)> {
        if !self.dimensions.contains(x, y, z) {
            return None;
        }
        let size = self.dimensions.chunk_size;
        let (x, y, z) = (x as usize, y as usize, z as usize);
        let chunk_index = x / size + (z / size) * self.dimensions.world_size_x;
        Some((chunk_index, x % size, y, z % size))
    }

    /// Writes a voxel. Out-of-range coordinates are ignored.
    ///
    /// Setting `AIR_ID` clears the cell. The active count changes only when
    /// the cell flips between empty and solid, and the owning chunk is
    /// marked dirty on every in-range write.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, id: VoxelId) {
        let Some((chunk_index, lx, ly, lz)) = self.resolve(x, y, z) else {
            if cfg!(debug_assertions) {
                log::trace!("Dropped out-of-range voxel write at ({x}, {y}, {z})");
            }
            return;
        };

        let world_position = self.dimensions.world_position(x, y, z);
        match self.chunks[chunk_index].set_cell(lx, ly, lz, id, world_position) {
            1 => self.active_voxels += 1,
            -1 => self.active_voxels -= 1,
            _ => {}
        }
    }

    /// Reads a voxel id, `AIR_ID` when out of range.
    #[inline]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> VoxelId {
        match self.resolve(x, y, z) {
            Some((chunk_index, lx, ly, lz)) => self.chunks[chunk_index].cell(lx, ly, lz).id,
            None => AIR_ID,
        }
    }

    /// Whether the voxel is active. Out-of-range coordinates are open air.
    #[inline]
    pub fn is_voxel_solid(&self, x: i32, y: i32, z: i32) -> bool {
        match self.resolve(x, y, z) {
            Some((chunk_index, lx, ly, lz)) => self.chunks[chunk_index].is_block_solid(lx, ly, lz),
            None => false,
        }
    }

    /// Empties a whole chunk. Out-of-range chunk coordinates are ignored.
    pub fn clear_chunk(&mut self, cx: i32, cz: i32) {
        let Some(chunk) = self.chunk_mut(cx, cz) else {
            return;
        };
        let cleared = chunk.clear();
        self.active_voxels -= cleared;
        log::debug!("Cleared chunk ({cx}, {cz}), {cleared} voxels removed");
    }

    /// Writes an SDF sample. Ignored outside the world or without an SDF.
    #[inline]
    pub fn set_voxel_sdf(&mut self, x: i32, y: i32, z: i32, value: f32) {
        if let Some(sdf) = self.sdf.as_mut() {
            sdf.set(x, y, z, value);
        }
    }

    /// Reads an SDF sample, `1.0` ("outside") for any invalid query.
    #[inline]
    pub fn get_voxel_sdf(&self, x: i32, y: i32, z: i32) -> f32 {
        match self.sdf.as_ref() {
            Some(sdf) => sdf.get(x, y, z),
            None => SDF_OUTSIDE,
        }
    }

    /// The SDF volume, present only in surface-nets mode.
    pub fn sdf(&self) -> Option<&SdfVolume> {
        self.sdf.as_ref()
    }

    /// Mutable access to the SDF volume, used by bulk generation.
    pub fn sdf_mut(&mut self) -> Option<&mut SdfVolume> {
        self.sdf.as_mut()
    }

    fn chunk_index(&self, cx: i32, cz: i32) -> Option<usize> {
        if cx < 0
            || cz < 0
            || cx as usize >= self.dimensions.world_size_x
            || cz as usize >= self.dimensions.world_size_z
        {
            return None;
        }
        Some(cx as usize + cz as usize * self.dimensions.world_size_x)
    }

    /// The chunk at chunk coordinates `(cx, cz)`.
    pub fn chunk(&self, cx: i32, cz: i32) -> Option<&Chunk> {
        self.chunk_index(cx, cz).map(|index| &self.chunks[index])
    }

    /// Mutable access to a chunk, for consumers clearing dirty flags.
    ///
    /// Cells themselves are only writable through the world.
    pub fn chunk_mut(&mut self, cx: i32, cz: i32) -> Option<&mut Chunk> {
        self.chunk_index(cx, cz).map(move |index| &mut self.chunks[index])
    }

    /// Every chunk, indexed `cx + cz * world_size_x`.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Positions of chunks whose dirty flag is set.
    pub fn dirty_chunks(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        self.chunks
            .iter()
            .filter(|chunk| chunk.is_dirty())
            .map(|chunk| chunk.position)
    }
}
