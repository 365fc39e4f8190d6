//! # Writing initial-condition files
//!
//! [`dump`] is the entry point of the crate: it checks a [`Header`]/[`Body`]
//! pair and writes it as a Gadget-2 binary snapshot file.
//!
//! ## Sequence
//!
//! 1. Refuse an existing destination unless [`OverwritePolicy::Overwrite`] is set.
//! 2. Run [`validate_header`], [`validate_body`], [`validate_consistency`] and
//!    compute the body layout. Any failure here leaves the destination untouched.
//! 3. Open the destination and write the header block then the body blocks
//!    through a buffered writer.
//! 4. Flush and `fsync` the file. Success is reported only after that.
//!
//! ## Failures
//!
//! Errors for which [`GadgetError::is_validation_error`] is `true` are raised
//! before the destination is opened. Any other error means bytes may have
//! reached the destination: the file is garbage and must be recreated, never
//! resumed.
//!
//! ## Example
//!
//! ```rust, no_run
//! use gadget_ic::{body::Body, dump::{dump, OverwritePolicy}, header::Header};
//!
//! let npart = [1, 2, 0, 0, 0, 0];
//! let header = Header::new(npart);
//! let mut body = Body::new(npart).unwrap();
//! body.id = vec![0, 1, 2];
//! body.mass = vec![1.0; 3];
//!
//! dump(&header, &body, "ic.dat", OverwritePolicy::Forbid).unwrap();
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    str::FromStr,
};

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    body::Body,
    constants::HEADER_BLOCK_BYTES,
    encoder::{block::BlockLayout, encode_body, encode_header},
    gadget_errors::GadgetError,
    header::Header,
    validation::{validate_body, validate_consistency, validate_header},
};

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Fail with [`GadgetError::DestinationExists`]
    #[default]
    Forbid,
    /// Truncate and rewrite the existing file
    Overwrite,
}

impl FromStr for OverwritePolicy {
    type Err = GadgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forbid" => Ok(OverwritePolicy::Forbid),
            "overwrite" => Ok(OverwritePolicy::Overwrite),
            _ => Err(GadgetError::UnknownOverwritePolicy(s.to_string())),
        }
    }
}

/// Run every check on the pair and return the body layout.
fn check_snapshot(header: &Header, body: &Body) -> Result<Vec<BlockLayout>, GadgetError> {
    validate_header(header)?;
    validate_body(body)?;
    validate_consistency(header, body)?;
    body.block_layout()
}

/// Size in bytes of the file [`dump`] would write for this pair.
///
/// Return
/// ----------
/// * The header block size plus the size of every body block, or the first
///   validation error of the pair.
pub fn expected_file_size(header: &Header, body: &Body) -> Result<usize, GadgetError> {
    let layout = check_snapshot(header, body)?;
    Ok(HEADER_BLOCK_BYTES + layout.iter().map(BlockLayout::disk_bytes).sum::<usize>())
}

/// Validate a snapshot and encode it into any writer.
///
/// Arguments
/// -----------------
/// * `header`: Snapshot header.
/// * `body`: Snapshot body.
/// * `out`: Destination stream. Nothing is written to it if validation fails.
///
/// Return
/// ----------
/// * `Ok(())` once the header and body blocks are written. The stream is not flushed.
///
/// See also
/// ------------
/// * [`dump`] – Same, into a file.
pub fn write_snapshot<W: Write>(
    header: &Header,
    body: &Body,
    out: &mut W,
) -> Result<(), GadgetError> {
    check_snapshot(header, body)?;
    encode_header(header, out)?;
    encode_body(body, out)
}

fn open_destination(destination: &Utf8Path, policy: OverwritePolicy) -> Result<File, GadgetError> {
    let opened = match policy {
        OverwritePolicy::Forbid => OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination),
        OverwritePolicy::Overwrite => File::create(destination),
    };
    opened.map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists => GadgetError::DestinationExists(destination.to_string()),
        _ => GadgetError::IoError(err),
    })
}

/// Check a snapshot and write it as a Gadget-2 initial-condition file.
///
/// Arguments
/// -----------------
/// * `header`: Snapshot header.
/// * `body`: Snapshot body.
/// * `destination`: Path of the output file.
/// * `policy`: Behaviour when `destination` already exists.
///
/// Return
/// ----------
/// * `Ok(())` once the file is written, flushed and synced to disk.
/// * [`GadgetError::DestinationExists`] if the file exists and `policy` is
///   [`OverwritePolicy::Forbid`].
/// * Any validation error of the pair, before the file is created.
/// * [`GadgetError::HeaderFormatError`] or [`GadgetError::IoError`] if
///   encoding fails. The partially written file must then be discarded.
///
/// See also
/// ------------
/// * [`write_snapshot`] – Encoding into an arbitrary writer.
/// * [`expected_file_size`] – Size of the resulting file.
pub fn dump(
    header: &Header,
    body: &Body,
    destination: impl AsRef<Utf8Path>,
    policy: OverwritePolicy,
) -> Result<(), GadgetError> {
    let destination = destination.as_ref();

    if destination.exists() {
        match policy {
            OverwritePolicy::Forbid => {
                return Err(GadgetError::DestinationExists(destination.to_string()))
            }
            OverwritePolicy::Overwrite => warn!(%destination, "overwriting existing file"),
        }
    }

    let layout = check_snapshot(header, body)?;
    let file_size =
        HEADER_BLOCK_BYTES + layout.iter().map(BlockLayout::disk_bytes).sum::<usize>();

    let mut writer = BufWriter::new(open_destination(destination, policy)?);
    encode_header(header, &mut writer)?;
    encode_body(body, &mut writer)?;

    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;
    drop(file);

    info!(%destination, bytes = file_size, "{}", body.summary());
    debug!("\n{header}");
    Ok(())
}
