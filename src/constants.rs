//! # Constants and type definitions for gadget_ic
//!
//! This module centralizes the **binary layout constants** of the legacy Gadget-2
//! snapshot format and the **common type definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Record markers and fixed header sizes
//! - Element sizes of the narrowed on-disk encodings
//! - The six legacy particle types
//! - Core type aliases used across the crate

use serde::{Deserialize, Serialize};

// -------------------------------------------------------------------------------------------------
// Binary layout
// -------------------------------------------------------------------------------------------------

/// Number of particle types in the legacy format
pub const N_PARTICLE_TYPES: usize = 6;

/// Size in bytes of the header payload region (named fields + zero padding)
pub const HEADER_PAYLOAD_BYTES: u32 = 256;

/// Size in bytes of one Fortran-style record marker
pub const MARKER_BYTES: usize = 4;

/// Bytes written from the start of the header block up to the postamble
pub const HEADER_BYTES_BEFORE_POSTAMBLE: usize = MARKER_BYTES + HEADER_PAYLOAD_BYTES as usize;

/// Total size of the header block on disk (preamble + payload + postamble)
pub const HEADER_BLOCK_BYTES: usize = HEADER_BYTES_BEFORE_POSTAMBLE + MARKER_BYTES;

/// On-disk size of a narrowed float element (`f32`)
pub const FLOAT_BYTES: usize = 4;

/// On-disk size of a narrowed particle ID (`u32`)
pub const ID_BYTES: usize = 4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Per-type particle counts, indexed by [`ParticleType`]
pub type ParticleCounts = [u32; N_PARTICLE_TYPES];

/// Particle identifier as used for computation (narrowed to `u32` on disk)
pub type ParticleId = u64;

/// Position / velocity vector in the caller's unit system
pub type Vec3 = nalgebra::Vector3<f64>;

// -------------------------------------------------------------------------------------------------
// Particle types
// -------------------------------------------------------------------------------------------------

/// The six fixed particle categories of Gadget-2. Type 0 is always gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParticleType {
    Gas = 0,
    Halo = 1,
    Disk = 2,
    Bulge = 3,
    Stars = 4,
    Boundary = 5,
}

impl ParticleType {
    /// All particle types in on-disk order.
    pub const ALL: [ParticleType; N_PARTICLE_TYPES] = [
        ParticleType::Gas,
        ParticleType::Halo,
        ParticleType::Disk,
        ParticleType::Bulge,
        ParticleType::Stars,
        ParticleType::Boundary,
    ];

    /// Position of this type in the count and mass arrays
    pub fn index(self) -> usize {
        self as usize
    }

    /// Particle type stored at `index` in the per-type arrays, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for ParticleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParticleType::Gas => "gas",
            ParticleType::Halo => "halo",
            ParticleType::Disk => "disk",
            ParticleType::Bulge => "bulge",
            ParticleType::Stars => "stars",
            ParticleType::Boundary => "boundary",
        };
        write!(f, "{name}")
    }
}
