//! Sanity checks run before a snapshot is encoded.
//!
//! Three passes, from the cheapest to the most expensive, each stopping at the
//! first violation:
//!
//! 1. [`validate_header`] – header-only rules,
//! 2. [`validate_body`] – internal agreement of the body arrays,
//! 3. [`validate_consistency`] – body sizes against the header counts, and
//!    uniqueness of the particle IDs.
//!
//! Only a single file per snapshot is supported: the expected sizes are taken
//! from `num_part_this_file`, never from `num_part_total`.

use ahash::AHashSet;
use tracing::{info, warn};

use crate::{
    body::Body,
    constants::{ParticleType, N_PARTICLE_TYPES},
    gadget_errors::GadgetError,
    header::Header,
};

/// Check that an array named `field` holds `expected` elements.
///
/// Return
/// ----------
/// * [`GadgetError::ShapeMismatch`] carrying the field name and both lengths
///   when `found != expected`.
pub fn check_len(field: &'static str, found: usize, expected: usize) -> Result<(), GadgetError> {
    if found != expected {
        return Err(GadgetError::ShapeMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

/// Run the header-only checks.
///
/// Arguments
/// -----------------
/// * `header`: Header to check.
///
/// Return
/// ----------
/// * [`GadgetError::EmptySnapshot`] if `num_part_this_file` or `num_part_total` sums to zero.
/// * [`GadgetError::NegativeMass`] for the first negative `mass_table` entry.
/// * [`GadgetError::InvalidFileCount`] if `num_files_per_snapshot` is not positive.
/// * [`GadgetError::ShapeMismatch`] if a per-type array does not hold 6 entries.
pub fn validate_header(header: &Header) -> Result<(), GadgetError> {
    info!("Checking header");

    let total: u64 = header.num_part_total.iter().map(|&n| n as u64).sum();
    if header.total_this_file() == 0 || total == 0 {
        return Err(GadgetError::EmptySnapshot);
    }

    // every entry, including any beyond the 6 particle types
    if let Some((index, &value)) = header
        .mass_table
        .iter()
        .enumerate()
        .find(|(_, &mass)| mass < 0.0)
    {
        match ParticleType::from_index(index) {
            Some(ptype) => warn!(%ptype, value, "negative fixed mass"),
            None => warn!(index, value, "negative mass past the last particle type"),
        }
        return Err(GadgetError::NegativeMass { index, value });
    }

    if header.num_files_per_snapshot <= 0 {
        return Err(GadgetError::InvalidFileCount(
            header.num_files_per_snapshot,
        ));
    }

    check_len(
        "num_part_this_file",
        header.num_part_this_file.len(),
        N_PARTICLE_TYPES,
    )?;
    check_len(
        "num_part_total",
        header.num_part_total.len(),
        N_PARTICLE_TYPES,
    )?;
    check_len("mass_table", header.mass_table.len(), N_PARTICLE_TYPES)?;
    Ok(())
}

/// Run the body-only checks: `pos`/`vel` and `id`/`mass` must have matching lengths.
///
/// Return
/// ----------
/// * [`GadgetError::ShapeMismatch`] naming the array that disagrees with its partner.
pub fn validate_body(body: &Body) -> Result<(), GadgetError> {
    info!("Checking body");

    check_len("vel", body.vel.len(), body.pos.len())?;
    check_len("mass", body.mass.len(), body.id.len())?;
    Ok(())
}

/// Check the body against the header counts.
///
/// With `npart = header.num_part_this_file`, `n_total = sum(npart)` and
/// `n_gas = npart[0]`:
///
/// * `pos`, `vel`, `mass`, `id` must hold `n_total` elements,
/// * `u` must hold `n_gas` elements, so it must be empty without gas,
/// * every present optional field must hold `n_gas` (gas-only fields) or
///   `n_total` elements,
/// * particle IDs must be pairwise distinct.
///
/// IDs are compared as 64-bit values but written as `u32`: two IDs that
/// differ only above bit 31 pass this check and collide on disk. A warning
/// is logged when any ID exceeds `u32::MAX`.
///
/// Return
/// ----------
/// * [`GadgetError::ShapeMismatch`] for the first array with an unexpected length.
/// * [`GadgetError::DuplicateId`] with the first repeated ID.
pub fn validate_consistency(header: &Header, body: &Body) -> Result<(), GadgetError> {
    info!("Checking header/body consistency");

    let n_total = header.total_this_file() as usize;
    let n_gas = header.count_of(ParticleType::Gas) as usize;

    check_len("pos", body.pos.len(), n_total)?;
    check_len("vel", body.vel.len(), n_total)?;
    check_len("mass", body.mass.len(), n_total)?;
    check_len("id", body.id.len(), n_total)?;

    check_len("u", body.u.len(), n_gas)?;

    for field in body.fields() {
        let found = body.extended(field).map_or(0, <[f64]>::len);
        check_len(field.name(), found, field.element_count(n_total, n_gas))?;
    }

    let mut seen = AHashSet::with_capacity(body.id.len());
    if let Some(&duplicate) = body.id.iter().find(|&&id| !seen.insert(id)) {
        return Err(GadgetError::DuplicateId(duplicate));
    }

    let wide = body.id.iter().filter(|&&id| id > u32::MAX as u64).count();
    if wide > 0 {
        warn!(wide, "particle IDs above u32::MAX are truncated on disk");
    }
    Ok(())
}
