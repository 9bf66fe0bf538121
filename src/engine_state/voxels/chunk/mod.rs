//! # Chunk Module
//!
//! This module provides the `Chunk` struct, a dense column of voxel cells
//! `chunk_size` wide, `max_height` tall and `chunk_size` deep.
//!
//! ## Storage Layout
//!
//! Cells live in one flat contiguous buffer indexed as
//! `x + y * chunk_size + z * chunk_size * max_height`, so a chunk is a single
//! allocation and scans never chase pointers.
//!
//! Alongside the cells the chunk keeps `solid_array`, a bit vector with one
//! bit per cell that mirrors `VoxelCell::active`. Face culling probes up to six
//! neighbours per voxel; reading those from a packed bit vector keeps the
//! probes in cache where the full cells would not fit.
//!
//! ### Performance Characteristics
//! - **Solidity Check**: O(1) - Just check the bit in `solid_array`
//! - **Cell Lookup**: O(1) - Direct index into `cells`
//! - **Memory Usage**: 1 bit + sizeof(VoxelCell) per cell

use bitvec::prelude::BitVec;
use bitvec::bitvec;
use cgmath::{Point2, Point3};

use super::block::{VoxelCell, VoxelId, AIR_ID};

pub mod chunk_iteration;

/// A fixed-size block of voxel cells owned by the world.
///
/// Every mutation sets the `dirty` flag. The voxel core never clears it; that
/// is left to whoever consumes the meshes (see [`Chunk::clear_dirty`]).
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (x, z).
    pub position: Point2<i32>,

    /// Width and depth of the chunk in cells.
    chunk_size: usize,

    /// Height of the chunk in cells.
    max_height: usize,

    /// Flat cell storage, see the module docs for the index layout.
    cells: Vec<VoxelCell>,

    /// One bit per cell, set when the cell is active.
    solid_array: BitVec,

    /// Set whenever a cell is written.
    dirty: bool,
}

impl Chunk {
    /// Creates a new, completely empty chunk.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `chunk_size` - Width and depth in cells
    /// * `max_height` - Height in cells
    pub fn empty(position: Point2<i32>, chunk_size: usize, max_height: usize) -> Self {
        let cell_count = chunk_size * chunk_size * max_height;
        Chunk {
            position,
            chunk_size,
            max_height,
            cells: vec![VoxelCell::EMPTY; cell_count],
            solid_array: bitvec![0; cell_count],
            dirty: false,
        }
    }

    /// Width and depth of the chunk in cells.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Height of the chunk in cells.
    #[inline]
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Flat buffer index of a chunk-local coordinate.
    ///
    /// The coordinate must be in range; callers resolve world coordinates
    /// through `VoxelWorld`, which does the bounds check.
    #[inline]
    pub fn cell_index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.chunk_size && y < self.max_height && z < self.chunk_size);
        x + y * self.chunk_size + z * self.chunk_size * self.max_height
    }

    /// Gets the cell at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn cell(&self, x: usize, y: usize, z: usize) -> &VoxelCell {
        &self.cells[self.cell_index(x, y, z)]
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[VoxelCell] {
        &self.cells
    }

    /// Writes a cell and marks the chunk dirty.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - Chunk-relative coordinates
    /// * `id` - New voxel id, `AIR_ID` clears the cell
    /// * `world_position` - Cached world-space position of the cell
    ///
    /// # Returns
    /// `1`, `-1` or `0`: the change in this chunk's active-cell count.
    pub(crate) fn set_cell(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        id: VoxelId,
        world_position: Point3<f32>,
    ) -> i32 {
        let index = self.cell_index(x, y, z);
        let delta = self.cells[index].assign(id, world_position);
        if delta != 0 {
            self.solid_array.set(index, delta > 0);
        }
        self.dirty = true;
        delta
    }

    /// Checks if the cell at the specified chunk-relative coordinates is solid.
    ///
    /// # Returns
    /// `true` if the cell is active, `false` if it's air.
    #[inline]
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.solid_array[self.cell_index(x, y, z)]
    }

    /// Resets every cell to air and marks the chunk dirty.
    ///
    /// # Returns
    /// How many cells were active before the clear.
    pub(crate) fn clear(&mut self) -> usize {
        let previously_active = self.active_count();
        for cell in self.cells.iter_mut() {
            let position = cell.world_position;
            cell.assign(AIR_ID, position);
        }
        self.solid_array.fill(false);
        self.dirty = true;
        previously_active
    }

    /// Number of active cells in the chunk.
    pub fn active_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Whether the chunk was written since the flag was last cleared.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag once a consumer has picked up the changes.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> Chunk {
        Chunk::empty(Point2::new(0, 0), 4, 8)
    }

    #[test]
    fn index_layout_is_x_then_y_then_z() {
        let chunk = chunk();
        assert_eq!(chunk.cell_index(1, 0, 0), 1);
        assert_eq!(chunk.cell_index(0, 1, 0), 4);
        assert_eq!(chunk.cell_index(0, 0, 1), 32);
        assert_eq!(chunk.cell_index(3, 7, 3), chunk.cells().len() - 1);
    }

    #[test]
    fn set_cell_tracks_solidity_and_dirty() {
        let mut chunk = chunk();
        assert!(!chunk.is_dirty());

        assert_eq!(chunk.set_cell(1, 2, 3, 7, Point3::new(1.0, 2.0, 3.0)), 1);
        assert!(chunk.is_block_solid(1, 2, 3));
        assert_eq!(chunk.cell(1, 2, 3).id, 7);
        assert!(chunk.is_dirty());

        chunk.clear_dirty();
        assert_eq!(chunk.set_cell(1, 2, 3, AIR_ID, Point3::new(1.0, 2.0, 3.0)), -1);
        assert!(!chunk.is_block_solid(1, 2, 3));
        assert!(chunk.is_dirty());
    }

    #[test]
    fn clear_reports_previous_active_count() {
        let mut chunk = chunk();
        chunk.set_cell(0, 0, 0, 1, Point3::new(0.0, 0.0, 0.0));
        chunk.set_cell(3, 7, 3, 2, Point3::new(3.0, 7.0, 3.0));
        chunk.clear_dirty();

        assert_eq!(chunk.clear(), 2);
        assert_eq!(chunk.active_count(), 0);
        assert!(chunk.cells().iter().all(|cell| !cell.active && cell.id == AIR_ID));
        assert!(chunk.is_dirty());
    }
}
