//! # Binary encoder for Gadget-2 snapshot files (format 1)
//!
//! Serializes a [`Header`] and a [`Body`] into the legacy unformatted-Fortran
//! layout read by Gadget-2 with `ICFormat = 1`. Everything is little-endian.
//!
//! ## Header block (264 bytes)
//!
//! ```text
//! offset  size  content
//!      0     4  u32 marker = 256
//!      4    24  u32 × 6   num_part_this_file
//!     28    48  f64 × 6   mass_table
//!     76     8  f64       time
//!     84     8  f64       redshift
//!     92     4  i32       flag_sfr
//!     96     4  i32       flag_feedback
//!    100    24  u32 × 6   num_part_total
//!    124     4  i32       flag_cooling
//!    128     4  i32       num_files_per_snapshot
//!    132    32  f64 × 4   box_size, omega0, omega_lambda, hubble_param
//!    164     4  i32       flag_stellar_age
//!    168     4  i32       flag_metals
//!    172    88  zero padding
//!    260     4  u32 marker = 256
//! ```
//!
//! ## Body blocks
//!
//! `pos, vel, id, mass, u`, then the present optional fields
//! `rho, ne, nh, hsml, pot, acce, endt, tstp`, each written as a symmetric
//! block (see [`block`]).
//!
//! Nothing here validates the data: callers go through
//! [`crate::dump::write_snapshot`] or run [`crate::validation`] first.

pub mod block;
pub mod counting_writer;

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::{debug, info};

use crate::{
    body::Body,
    constants::{
        HEADER_BYTES_BEFORE_POSTAMBLE, HEADER_PAYLOAD_BYTES, MARKER_BYTES, N_PARTICLE_TYPES,
    },
    gadget_errors::GadgetError,
    header::Header,
    validation::check_len,
};
use counting_writer::CountingWriter;

const ZERO_PADDING: [u8; HEADER_PAYLOAD_BYTES as usize] = [0; HEADER_PAYLOAD_BYTES as usize];

fn write_u32_array<W: Write>(
    out: &mut W,
    field: &'static str,
    values: &[u32],
) -> Result<(), GadgetError> {
    check_len(field, values.len(), N_PARTICLE_TYPES)?;
    for &value in values {
        out.write_u32::<LittleEndian>(value)?;
    }
    Ok(())
}

fn write_f64_array<W: Write>(
    out: &mut W,
    field: &'static str,
    values: &[f64],
) -> Result<(), GadgetError> {
    check_len(field, values.len(), N_PARTICLE_TYPES)?;
    for &value in values {
        out.write_f64::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Write the 264-byte header block.
///
/// Arguments
/// -----------------
/// * `header`: Header to encode. Its three per-type arrays must hold exactly 6 entries.
/// * `out`: Destination stream, positioned where the header block starts.
///
/// Return
/// ----------
/// * `Ok(())` once the postamble is written.
/// * [`GadgetError::ShapeMismatch`] if a per-type array does not hold 6 entries.
/// * [`GadgetError::HeaderFormatError`] if the payload between the two markers is
///   not exactly 256 bytes.
/// * [`GadgetError::IoError`] if the stream fails.
///
/// See also
/// ------------
/// * [`encode_body`] – Blocks written right after the header.
pub fn encode_header<W: Write>(header: &Header, out: &mut W) -> Result<(), GadgetError> {
    info!("Writing header (little endian)");

    let mut out = CountingWriter::new(out);

    out.write_u32::<LittleEndian>(HEADER_PAYLOAD_BYTES)?;
    write_u32_array(&mut out, "num_part_this_file", &header.num_part_this_file)?;
    write_f64_array(&mut out, "mass_table", &header.mass_table)?;
    out.write_f64::<LittleEndian>(header.time)?;
    out.write_f64::<LittleEndian>(header.redshift)?;
    out.write_i32::<LittleEndian>(header.flag_sfr)?;
    out.write_i32::<LittleEndian>(header.flag_feedback)?;
    write_u32_array(&mut out, "num_part_total", &header.num_part_total)?;
    out.write_i32::<LittleEndian>(header.flag_cooling)?;
    out.write_i32::<LittleEndian>(header.num_files_per_snapshot)?;
    out.write_f64::<LittleEndian>(header.box_size)?;
    out.write_f64::<LittleEndian>(header.omega0)?;
    out.write_f64::<LittleEndian>(header.omega_lambda)?;
    out.write_f64::<LittleEndian>(header.hubble_param)?;
    out.write_i32::<LittleEndian>(header.flag_stellar_age)?;
    out.write_i32::<LittleEndian>(header.flag_metals)?;

    // reserved bytes: NumPart_Total_HW, Flag_Entropy_ICs and the unused tail
    let padding = HEADER_BYTES_BEFORE_POSTAMBLE.saturating_sub(out.written());
    out.write_all(&ZERO_PADDING[..padding.min(ZERO_PADDING.len())])?;
    out.write_u32::<LittleEndian>(HEADER_PAYLOAD_BYTES)?;

    // unreachable once the three arrays passed their length checks
    let payload_bytes = out.written() - 2 * MARKER_BYTES;
    if payload_bytes != HEADER_PAYLOAD_BYTES as usize {
        return Err(GadgetError::HeaderFormatError { payload_bytes });
    }
    Ok(())
}

/// Write the body blocks in their fixed order.
///
/// The whole layout is computed before the first byte is written, so an
/// oversized block is reported without touching the stream.
///
/// Arguments
/// -----------------
/// * `body`: Body to encode.
/// * `out`: Destination stream, positioned right after the header block.
///
/// Return
/// ----------
/// * `Ok(())` once every block is written.
/// * [`GadgetError::BlockTooLarge`] if a block does not fit a 32-bit marker.
/// * [`GadgetError::IoError`] if the stream fails.
///
/// See also
/// ------------
/// * [`Body::block_layout`] – Sizes of the blocks written here.
pub fn encode_body<W: Write>(body: &Body, out: &mut W) -> Result<(), GadgetError> {
    info!("Writing body (little endian)");

    let blocks = body.blocks();
    let layouts = blocks
        .iter()
        .map(|block| block.layout())
        .collect::<Result<Vec<_>, _>>()?;

    for (block, layout) in blocks.iter().zip(&layouts) {
        debug!(
            block = layout.name,
            elements = layout.element_count,
            nbytes = layout.nbytes,
            "writing block"
        );
        block.write_to(layout.nbytes, out)?;
    }
    Ok(())
}
