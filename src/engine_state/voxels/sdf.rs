//! # SDF Volume Module
//!
//! A dense signed distance field covering the whole world extent, one sample
//! per voxel. Negative samples are inside the surface, positive ones outside.
//! Only worlds built for the heightfield backend allocate one.

/// The value of every sample before anything is written, and the value read
/// back for any invalid query: "outside the surface".
pub const SDF_OUTSIDE: f32 = 1.0;

/// Dense per-voxel signed distance samples.
///
/// Samples are stored in a flat buffer indexed `x + width * (y + height * z)`.
#[derive(Debug, Clone)]
pub struct SdfVolume {
    width: usize,
    height: usize,
    depth: usize,
    samples: Vec<f32>,
}

impl SdfVolume {
    /// Allocates a volume of the given extent filled with [`SDF_OUTSIDE`].
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        SdfVolume {
            width,
            height,
            depth,
            samples: vec![SDF_OUTSIDE; width * height * depth],
        }
    }

    /// Extent of the volume as `(width, height, depth)`.
    pub fn extent(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Flat index of an in-range coordinate, `None` otherwise.
    #[inline]
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(x + self.width * (y + self.height * z))
    }

    /// Reads a sample, [`SDF_OUTSIDE`] when out of range.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> f32 {
        self.index(x, y, z)
            .map_or(SDF_OUTSIDE, |index| self.samples[index])
    }

    /// Writes a sample; out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: f32) {
        if let Some(index) = self.index(x, y, z) {
            self.samples[index] = value;
        }
    }

    /// Copies one full-height column block of samples into the volume.
    ///
    /// `block` holds `block_width * height * block_depth` samples laid out
    /// `x + block_width * (y + height * z)` relative to `(origin_x, origin_z)`.
    /// Columns falling outside the volume are skipped.
    pub fn write_block(
        &mut self,
        origin_x: usize,
        origin_z: usize,
        block_width: usize,
        block_depth: usize,
        block: &[f32],
    ) {
        debug_assert_eq!(block.len(), block_width * self.height * block_depth);
        let copy_width = block_width.min(self.width.saturating_sub(origin_x));
        if copy_width == 0 {
            return;
        }
        for z in 0..block_depth {
            let world_z = origin_z + z;
            if world_z >= self.depth {
                break;
            }
            for y in 0..self.height {
                let src = block_width * (y + self.height * z);
                let dst = origin_x + self.width * (y + self.height * world_z);
                self.samples[dst..dst + copy_width]
                    .copy_from_slice(&block[src..src + copy_width]);
            }
        }
    }

    /// All samples in storage order.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_outside_everywhere() {
        let volume = SdfVolume::new(3, 2, 4);
        assert_eq!(volume.samples().len(), 24);
        assert!(volume.samples().iter().all(|&s| s == SDF_OUTSIDE));
    }

    #[test]
    fn out_of_range_reads_outside_and_writes_are_dropped() {
        let mut volume = SdfVolume::new(2, 2, 2);
        volume.set(-1, 0, 0, -5.0);
        volume.set(0, 2, 0, -5.0);
        assert!(volume.samples().iter().all(|&s| s == SDF_OUTSIDE));
        assert_eq!(volume.get(5, 0, 0), SDF_OUTSIDE);
    }

    #[test]
    fn write_block_places_samples_and_clips() {
        let mut volume = SdfVolume::new(3, 1, 3);
        // 2x1x2 block at (2, 2): only (2, 0, 2) lands inside the volume.
        volume.write_block(2, 2, 2, 2, &[-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(volume.get(2, 0, 2), -1.0);
        assert_eq!(volume.get(1, 0, 2), SDF_OUTSIDE);

        volume.write_block(0, 0, 2, 2, &[-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(volume.get(0, 0, 0), -1.0);
        assert_eq!(volume.get(1, 0, 0), -2.0);
        assert_eq!(volume.get(0, 0, 1), -3.0);
        assert_eq!(volume.get(1, 0, 1), -4.0);
    }
}
