//! Symmetric Fortran-style records used by the body.
//!
//! Each block is `[u32 nbytes][payload][u32 nbytes]`, little-endian, where
//! `nbytes = element_count × components × 4`. Every element is narrowed to a
//! 4-byte type on disk: floats become `f32` and particle IDs become `u32`.
//! The narrowing is part of the legacy format and intentionally lossy.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    constants::{ParticleId, Vec3, FLOAT_BYTES, ID_BYTES, MARKER_BYTES},
    gadget_errors::GadgetError,
};

/// Borrowed contents of one body block.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BlockData<'a> {
    Vectors(&'a [Vec3]),
    Ids(&'a [ParticleId]),
    Scalars(&'a [f64]),
}

/// A named block ready to be written.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Block<'a> {
    pub name: &'static str,
    pub data: BlockData<'a>,
}

/// Size description of one block, independent of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub name: &'static str,
    /// Number of particles covered by the block
    pub element_count: usize,
    /// 3 for vector fields, 1 otherwise
    pub components: usize,
    /// On-disk size of one component
    pub element_bytes: usize,
    /// Value of both size markers
    pub nbytes: u32,
}

impl BlockLayout {
    /// Bytes taken by the block on disk, markers included.
    pub fn disk_bytes(&self) -> usize {
        self.nbytes as usize + 2 * MARKER_BYTES
    }
}

impl<'a> Block<'a> {
    pub fn new(name: &'static str, data: BlockData<'a>) -> Self {
        Block { name, data }
    }

    pub fn element_count(&self) -> usize {
        match self.data {
            BlockData::Vectors(v) => v.len(),
            BlockData::Ids(ids) => ids.len(),
            BlockData::Scalars(s) => s.len(),
        }
    }

    pub fn components(&self) -> usize {
        match self.data {
            BlockData::Vectors(_) => 3,
            BlockData::Ids(_) | BlockData::Scalars(_) => 1,
        }
    }

    pub fn element_bytes(&self) -> usize {
        match self.data {
            BlockData::Ids(_) => ID_BYTES,
            BlockData::Vectors(_) | BlockData::Scalars(_) => FLOAT_BYTES,
        }
    }

    /// Compute the block layout.
    ///
    /// Return
    /// ----------
    /// * The [`BlockLayout`], or [`GadgetError::BlockTooLarge`] if the payload
    ///   size does not fit the 32-bit markers.
    pub fn layout(&self) -> Result<BlockLayout, GadgetError> {
        let element_count = self.element_count();
        let components = self.components();
        let element_bytes = self.element_bytes();
        let size = element_count
            .checked_mul(components * element_bytes)
            .unwrap_or(usize::MAX);
        let nbytes = u32::try_from(size).map_err(|_| GadgetError::BlockTooLarge {
            block: self.name,
            nbytes: size,
        })?;

        Ok(BlockLayout {
            name: self.name,
            element_count,
            components,
            element_bytes,
            nbytes,
        })
    }

    /// Write the block, markers included.
    ///
    /// Arguments
    /// -----------------
    /// * `nbytes`: Marker value, as computed by [`Block::layout`].
    /// * `out`: Destination stream.
    pub fn write_to<W: Write>(&self, nbytes: u32, out: &mut W) -> io::Result<()> {
        out.write_u32::<LittleEndian>(nbytes)?;
        match self.data {
            BlockData::Vectors(vectors) => {
                for v in vectors {
                    out.write_f32::<LittleEndian>(v.x as f32)?;
                    out.write_f32::<LittleEndian>(v.y as f32)?;
                    out.write_f32::<LittleEndian>(v.z as f32)?;
                }
            }
            BlockData::Ids(ids) => {
                for &id in ids {
                    out.write_u32::<LittleEndian>(id as u32)?;
                }
            }
            BlockData::Scalars(values) => {
                for &value in values {
                    out.write_f32::<LittleEndian>(value as f32)?;
                }
            }
        }
        out.write_u32::<LittleEndian>(nbytes)
    }
}

#[cfg(test)]
mod test_block {
    use super::*;

    #[test]
    fn test_vector_block_bytes() {
        let pos = [Vec3::new(1.0, -2.0, 0.5)];
        let block = Block::new("pos", BlockData::Vectors(&pos));
        let layout = block.layout().unwrap();
        assert_eq!(layout.nbytes, 12);
        assert_eq!(layout.disk_bytes(), 20);

        let mut out = Vec::new();
        block.write_to(layout.nbytes, &mut out).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&12u32.to_le_bytes());
        expected.extend_from_slice(&1.0f32.to_le_bytes());
        expected.extend_from_slice(&(-2.0f32).to_le_bytes());
        expected.extend_from_slice(&0.5f32.to_le_bytes());
        expected.extend_from_slice(&12u32.to_le_bytes());
        assert_eq!(out, expected);
    }

    #[test]
    fn test_ids_are_narrowed_to_u32() {
        let ids = [7u64, (1u64 << 32) + 5];
        let block = Block::new("id", BlockData::Ids(&ids));
        let mut out = Vec::new();
        block.write_to(block.layout().unwrap().nbytes, &mut out).unwrap();

        assert_eq!(out.len(), 16);
        assert_eq!(&out[4..8], &7u32.to_le_bytes());
        assert_eq!(&out[8..12], &5u32.to_le_bytes());
    }

    #[test]
    fn test_scalars_are_narrowed_to_f32() {
        let values = [0.1f64];
        let block = Block::new("mass", BlockData::Scalars(&values));
        let mut out = Vec::new();
        block.write_to(4, &mut out).unwrap();
        assert_eq!(&out[4..8], &0.1f32.to_le_bytes());
    }

    #[test]
    fn test_empty_block_layout() {
        let block = Block::new("u", BlockData::Scalars(&[]));
        let layout = block.layout().unwrap();
        assert_eq!(layout.element_count, 0);
        assert_eq!(layout.nbytes, 0);
    }
}
