//! Snapshot header: the global metadata of one Gadget-2 file.
//!
//! The field names follow the HDF5 identifiers of the Gadget-2 user guide
//! (`NumPart_ThisFile`, `MassTable`, ...) converted to snake case, and their
//! on-disk order is given by [`crate::encoder::encode_header`].
//!
//! The per-type arrays are stored as `Vec`s rather than fixed arrays so that a
//! header built from external data (e.g. deserialized from a parameter file)
//! can be checked by [`crate::validation::validate_header`] instead of being
//! rejected at parse time.
//!
//! # Limitations
//!
//! * `NumPart_Total_HW` and `Flag_Entropy_ICs` are not part of the header:
//!   particle counts are assumed to fit in 32 bits and the corresponding bytes
//!   stay in the zero padding.
//! * `num_files_per_snapshot` is written as-is but data are never split across
//!   files: a snapshot is always a single file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ParticleCounts, ParticleType, N_PARTICLE_TYPES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Number of particles of each type in this file
    pub num_part_this_file: Vec<u32>,
    /// Total number of particles of each type in the snapshot
    pub num_part_total: Vec<u32>,
    /// Fixed mass of each type; 0 means the mass is stored per particle
    pub mass_table: Vec<f64>,
    /// Time of output, or expansion factor for cosmological runs
    pub time: f64,
    pub redshift: f64,
    pub flag_sfr: i32,
    pub flag_feedback: i32,
    pub flag_cooling: i32,
    pub num_files_per_snapshot: i32,
    /// Box size if periodic boundary conditions are used
    pub box_size: f64,
    /// Matter density at z=0
    pub omega0: f64,
    /// Vacuum energy density at z=0
    pub omega_lambda: f64,
    pub hubble_param: f64,
    pub flag_stellar_age: i32,
    pub flag_metals: i32,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            num_part_this_file: vec![0; N_PARTICLE_TYPES],
            num_part_total: vec![0; N_PARTICLE_TYPES],
            mass_table: vec![0.0; N_PARTICLE_TYPES],
            time: 0.0,
            redshift: 0.0,
            flag_sfr: 0,
            flag_feedback: 0,
            flag_cooling: 0,
            num_files_per_snapshot: 1,
            box_size: 0.0,
            omega0: 0.0,
            omega_lambda: 0.0,
            hubble_param: 0.0,
            flag_stellar_age: 0,
            flag_metals: 0,
        }
    }
}

impl Header {
    /// Build a single-file header where this file holds the whole snapshot.
    ///
    /// Arguments
    /// -----------------
    /// * `npart`: Number of particles of each type, in type order 0..5.
    ///
    /// Return
    /// ----------
    /// * A [`Header`] with `num_part_this_file == num_part_total == npart`,
    ///   one file per snapshot and every other field set to zero.
    pub fn new(npart: ParticleCounts) -> Self {
        Header {
            num_part_this_file: npart.to_vec(),
            num_part_total: npart.to_vec(),
            ..Header::default()
        }
    }

    /// Number of particles of `ptype` in this file (0 if the array is short).
    pub fn count_of(&self, ptype: ParticleType) -> u32 {
        self.num_part_this_file
            .get(ptype.index())
            .copied()
            .unwrap_or(0)
    }

    /// Sum of `num_part_this_file`, widened so it cannot overflow.
    pub fn total_this_file(&self) -> u64 {
        self.num_part_this_file.iter().map(|&n| n as u64).sum()
    }
}

impl fmt::Display for Header {
    /// Render a fixed-width table of the header fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 20;
        const VALUE_WIDTH: usize = 50;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        fn row(f: &mut fmt::Formatter<'_>, label: &str, value: String) -> fmt::Result {
            writeln!(
                f,
                "| {:<label_w$}| {:<value_w$}|",
                label,
                value,
                label_w = LABEL_WIDTH,
                value_w = VALUE_WIDTH
            )
        }

        writeln!(f, "{border}")?;
        row(f, "Snapshot Header", String::new())?;
        writeln!(f, "{border}")?;
        row(f, "NumPart_ThisFile", format!("{:?}", self.num_part_this_file))?;
        row(f, "NumPart_Total", format!("{:?}", self.num_part_total))?;
        row(f, "MassTable", format!("{:?}", self.mass_table))?;
        row(
            f,
            "Time / Redshift",
            format!("{} / {}", self.time, self.redshift),
        )?;
        row(
            f,
            "Flags",
            format!(
                "sfr={} fb={} cool={} age={} met={}",
                self.flag_sfr,
                self.flag_feedback,
                self.flag_cooling,
                self.flag_stellar_age,
                self.flag_metals
            ),
        )?;
        row(
            f,
            "NumFilesPerSnapshot",
            format!("{}", self.num_files_per_snapshot),
        )?;
        row(f, "BoxSize", format!("{}", self.box_size))?;
        row(
            f,
            "Cosmology",
            format!(
                "Omega0={} OmegaLambda={} h={}",
                self.omega0, self.omega_lambda, self.hubble_param
            ),
        )?;
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod test_header {
    use super::*;

    #[test]
    fn test_new_header_copies_counts() {
        let header = Header::new([1, 2, 0, 0, 0, 0]);
        assert_eq!(header.num_part_this_file, vec![1, 2, 0, 0, 0, 0]);
        assert_eq!(header.num_part_total, vec![1, 2, 0, 0, 0, 0]);
        assert_eq!(header.mass_table, vec![0.0; 6]);
        assert_eq!(header.num_files_per_snapshot, 1);
        assert_eq!(header.total_this_file(), 3);
        assert_eq!(header.count_of(ParticleType::Gas), 1);
        assert_eq!(header.count_of(ParticleType::Halo), 2);
    }

    #[test]
    fn test_total_does_not_overflow() {
        let header = Header::new([u32::MAX, u32::MAX, 0, 0, 0, 0]);
        assert_eq!(header.total_this_file(), 2 * u32::MAX as u64);
    }

    #[test]
    fn test_header_json_round_trip() {
        let mut header = Header::new([4, 0, 0, 0, 0, 0]);
        header.box_size = 100.0;
        let json = serde_json::to_string(&header).unwrap();
        let back: Header = serde_json::from_str(&json).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn test_display_header() {
        let header = Header::new([1, 2, 0, 0, 0, 0]);
        let output = format!("{header}");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("+---"));
        assert!(lines[1].contains("Snapshot Header"));
        assert!(lines[3].contains("[1, 2, 0, 0, 0, 0]"));
        assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
    }
}
