//! # gadget_ic
//!
//! Writer for **Gadget-2 binary initial-condition files** (`ICFormat = 1`).
//!
//! A caller allocates a [`header::Header`] and a [`body::Body`] for its particle
//! counts, fills positions, velocities, IDs, masses and gas quantities, then
//! calls [`dump::dump`]. The pair is validated, then encoded into the legacy
//! layout: a 264-byte header block followed by one size-delimited block per
//! particle field.
//!
//! Reading snapshots back, HDF5 output and multi-file snapshots are not
//! supported. Positions and velocities are written as given: any unit or
//! reference-frame conversion happens before the dump.

pub mod body;
pub mod constants;
pub mod dump;
pub mod encoder;
pub mod gadget_errors;
pub mod header;
pub mod validation;

pub use body::{extended_field::ExtendedField, Body};
pub use dump::{dump, write_snapshot, OverwritePolicy};
pub use gadget_errors::GadgetError;
pub use header::Header;
