//! # Chunk Iteration Module
//!
//! This module provides an iterator over the active cells of a chunk, one
//! horizontal layer at a time. Within a layer cells are visited with local x
//! as the outer loop and local z as the inner loop, which is the emission
//! order the instanced mesh builder relies on.
//!
//! The iterator consults the chunk's `solid_array` bit vector first and only
//! touches the full cell for active positions.

use cgmath::Point3;

use crate::engine_state::voxels::block::VoxelCell;

use super::Chunk;

/// An iterator over all active cells in a range of chunk layers.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Current local X position
    local_x: usize,
    /// Current Y layer
    local_y: usize,
    /// Current local Z position
    local_z: usize,
    /// One past the last layer to visit
    end_y: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates an iterator over every layer of the chunk, bottom to top.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        Self::layers(chunk_ref, 0, chunk_ref.max_height())
    }

    /// Creates an iterator over the single layer `y`.
    pub fn layer(chunk_ref: &'a Chunk, y: usize) -> Self {
        Self::layers(chunk_ref, y, y + 1)
    }

    fn layers(chunk_ref: &'a Chunk, start_y: usize, end_y: usize) -> Self {
        let end_y = end_y.min(chunk_ref.max_height());
        // An empty chunk footprint has nothing to visit.
        let local_y = if chunk_ref.chunk_size() == 0 { end_y } else { start_y };
        ChunkBlockIterator {
            chunk_ref,
            local_x: 0,
            local_y,
            local_z: 0,
            end_y,
        }
    }

    fn advance(&mut self) {
        self.local_z += 1;
        if self.local_z == self.chunk_ref.chunk_size() {
            self.local_z = 0;
            self.local_x += 1;
            if self.local_x == self.chunk_ref.chunk_size() {
                self.local_x = 0;
                self.local_y += 1;
            }
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    /// The chunk-local position of the cell and the cell itself.
    type Item = (Point3<usize>, &'a VoxelCell);

    fn next(&mut self) -> Option<Self::Item> {
        while self.local_y < self.end_y {
            let (x, y, z) = (self.local_x, self.local_y, self.local_z);
            self.advance();
            if self.chunk_ref.is_block_solid(x, y, z) {
                return Some((Point3::new(x, y, z), self.chunk_ref.cell(x, y, z)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point2;

    use super::*;

    #[test]
    fn layer_visits_x_outer_then_z() {
        let mut chunk = Chunk::empty(Point2::new(0, 0), 2, 2);
        chunk.set_cell(1, 0, 0, 1, Point3::new(1.0, 0.0, 0.0));
        chunk.set_cell(0, 0, 1, 1, Point3::new(0.0, 0.0, 1.0));
        chunk.set_cell(0, 1, 0, 1, Point3::new(0.0, 1.0, 0.0));

        let visited: Vec<_> = ChunkBlockIterator::layer(&chunk, 0)
            .map(|(position, _)| position)
            .collect();
        assert_eq!(visited, vec![Point3::new(0, 0, 1), Point3::new(1, 0, 0)]);

        assert_eq!(ChunkBlockIterator::new(&chunk).count(), 3);
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::empty(Point2::new(0, 0), 3, 3);
        assert!(ChunkBlockIterator::new(&chunk).next().is_none());
    }
}
