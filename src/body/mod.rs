//! # Snapshot body
//!
//! The per-particle payload of one snapshot file. A [`Body`] is allocated from
//! a 6-entry particle count vector and filled in place by the caller (an
//! initial-condition generator, a converter, ...), then handed read-only to
//! [`crate::dump::dump`].
//!
//! ## Sizes
//!
//! With `n_total = sum(npart)` and `n_gas = npart[0]`:
//!
//! | field                        | elements  | on disk        |
//! |------------------------------|-----------|----------------|
//! | `pos`, `vel`                 | `n_total` | 3 × `f32`      |
//! | `id`                         | `n_total` | `u32`          |
//! | `mass`                       | `n_total` | `f32`          |
//! | `u`                          | `n_gas`   | `f32`          |
//! | `rho`, `ne`, `nh`, `hsml`    | `n_gas`   | `f32`          |
//! | `endt`                       | `n_gas`   | `f32`          |
//! | `pot`, `acce`, `tstp`        | `n_total` | `f32`          |
//!
//! The per-particle `mass` block is always present, even when the header
//! `mass_table` gives a fixed mass for a type.
//!
//! ## Optional fields
//!
//! Optional blocks are chosen once at construction through
//! [`Body::with_fields`]; see [`extended_field`] for the enable chain. Their
//! arrays are zero-initialized and can only be modified in place, so they
//! always keep the size they were allocated with.

pub mod extended_field;

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    constants::{ParticleCounts, ParticleId, Vec3},
    encoder::block::{Block, BlockData, BlockLayout},
    gadget_errors::GadgetError,
};
use extended_field::{ExtendedField, ExtendedFieldSet};

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    npart: ParticleCounts,
    /// Positions
    pub pos: Vec<Vec3>,
    /// Velocities
    pub vel: Vec<Vec3>,
    /// Particle IDs, narrowed to `u32` when written
    pub id: Vec<ParticleId>,
    /// Per-particle masses
    pub mass: Vec<f64>,
    /// Internal energy per unit mass (gas only)
    pub u: Vec<f64>,
    extended: BTreeMap<ExtendedField, Vec<f64>>,
}

impl Body {
    /// Allocate a zeroed body without optional fields.
    ///
    /// Arguments
    /// -----------------
    /// * `npart`: Number of particles of each type, in type order 0..5.
    ///
    /// Return
    /// ----------
    /// * A [`Body`] sized for `npart`, or [`GadgetError::EmptySnapshot`] if
    ///   `npart` contains no particle at all.
    ///
    /// See also
    /// ------------
    /// * [`Body::with_fields`] – Same, with optional blocks.
    pub fn new(npart: ParticleCounts) -> Result<Self, GadgetError> {
        Self::with_fields(npart, &[])
    }

    /// Allocate a zeroed body carrying the requested optional fields and every
    /// field they depend on.
    ///
    /// Arguments
    /// -----------------
    /// * `npart`: Number of particles of each type, in type order 0..5.
    /// * `fields`: Optional blocks to enable. Lower fields of the chain are
    ///   added automatically.
    ///
    /// Return
    /// ----------
    /// * A [`Body`] sized for `npart`, or [`GadgetError::EmptySnapshot`] if
    ///   `npart` contains no particle at all.
    ///
    /// See also
    /// ------------
    /// * [`ExtendedFieldSet::resolve`] – Resolution of the enable chain.
    pub fn with_fields(
        npart: ParticleCounts,
        fields: &[ExtendedField],
    ) -> Result<Self, GadgetError> {
        let n_total = npart.iter().map(|&n| n as usize).sum::<usize>();
        if n_total == 0 {
            return Err(GadgetError::EmptySnapshot);
        }
        let n_gas = npart[0] as usize;

        let extended = ExtendedFieldSet::resolve(fields)
            .iter()
            .map(|field| (field, vec![0.0; field.element_count(n_total, n_gas)]))
            .collect();

        Ok(Body {
            npart,
            pos: vec![Vec3::zeros(); n_total],
            vel: vec![Vec3::zeros(); n_total],
            id: vec![0; n_total],
            mass: vec![0.0; n_total],
            u: vec![0.0; n_gas],
            extended,
        })
    }

    /// Particle counts this body was allocated for.
    pub fn npart(&self) -> &ParticleCounts {
        &self.npart
    }

    pub fn n_total(&self) -> usize {
        self.npart.iter().map(|&n| n as usize).sum()
    }

    pub fn n_gas(&self) -> usize {
        self.npart[0] as usize
    }

    /// `true` if `field` was enabled, directly or through the chain.
    pub fn has_field(&self, field: ExtendedField) -> bool {
        self.extended.contains_key(&field)
    }

    /// Present optional fields, in on-disk order.
    pub fn fields(&self) -> impl Iterator<Item = ExtendedField> + '_ {
        self.extended.keys().copied()
    }

    pub fn extended(&self, field: ExtendedField) -> Option<&[f64]> {
        self.extended.get(&field).map(Vec::as_slice)
    }

    /// Mutable view on an optional field. The slice length is fixed.
    pub fn extended_mut(&mut self, field: ExtendedField) -> Option<&mut [f64]> {
        self.extended.get_mut(&field).map(Vec::as_mut_slice)
    }

    /// Ordered list of the blocks that will be written for this body.
    ///
    /// Element counts come from the actual array lengths. Blocks without any
    /// element (gas-only blocks of a gas-free body) are left out.
    pub(crate) fn blocks(&self) -> Vec<Block<'_>> {
        let mandatory = [
            Block::new("pos", BlockData::Vectors(&self.pos)),
            Block::new("vel", BlockData::Vectors(&self.vel)),
            Block::new("id", BlockData::Ids(&self.id)),
            Block::new("mass", BlockData::Scalars(&self.mass)),
            Block::new("u", BlockData::Scalars(&self.u)),
        ];
        let optional = self
            .extended
            .iter()
            .map(|(field, values)| Block::new(field.name(), BlockData::Scalars(values)));

        mandatory
            .into_iter()
            .chain(optional)
            .filter(|block| block.element_count() > 0)
            .collect()
    }

    /// Size layout of the body blocks, computed without writing anything.
    ///
    /// Return
    /// ----------
    /// * The ordered [`BlockLayout`]s, or [`GadgetError::BlockTooLarge`] if a
    ///   block does not fit a 32-bit size marker.
    pub fn block_layout(&self) -> Result<Vec<BlockLayout>, GadgetError> {
        self.blocks().iter().map(Block::layout).collect()
    }

    /// One-line description of the body, used in logs.
    pub fn summary(&self) -> String {
        format!(
            "{} particles ({} gas), npart = {:?}, blocks: {}",
            self.n_total(),
            self.n_gas(),
            self.npart,
            self.blocks().iter().map(|block| block.name).join(" ")
        )
    }
}
