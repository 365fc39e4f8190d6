//! Optional per-particle blocks and their enable chain.
//!
//! Gadget-2 only reads a derived block when every block before it is present,
//! so the optional fields form a linear dependency chain:
//!
//! ```text
//! tstp → endt → acce → pot → hsml → nh → ne → rho
//! ```
//!
//! Enabling a field enables everything to its right. The chain is resolved
//! once, by [`ExtendedFieldSet::resolve`], into the concrete set of fields a
//! [`crate::body::Body`] carries; the encoder only iterates that set.

use std::collections::BTreeSet;
use std::fmt;

/// Optional block of a snapshot body.
///
/// Variants are declared in on-disk order, so the derived `Ord` is the
/// writing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtendedField {
    /// SPH density
    Rho,
    /// Electron abundance
    Ne,
    /// Hydrogen abundance
    Nh,
    /// SPH smoothing length
    Hsml,
    /// Gravitational potential
    Pot,
    /// Acceleration magnitude
    Acce,
    /// Rate of change of the entropic function
    Endt,
    /// Particle timestep
    Tstp,
}

impl ExtendedField {
    /// All optional fields, in on-disk order.
    pub const ALL: [ExtendedField; 8] = [
        ExtendedField::Rho,
        ExtendedField::Ne,
        ExtendedField::Nh,
        ExtendedField::Hsml,
        ExtendedField::Pot,
        ExtendedField::Acce,
        ExtendedField::Endt,
        ExtendedField::Tstp,
    ];

    /// The next-lower field this one cannot exist without.
    pub fn requires(self) -> Option<ExtendedField> {
        match self {
            ExtendedField::Rho => None,
            ExtendedField::Ne => Some(ExtendedField::Rho),
            ExtendedField::Nh => Some(ExtendedField::Ne),
            ExtendedField::Hsml => Some(ExtendedField::Nh),
            ExtendedField::Pot => Some(ExtendedField::Hsml),
            ExtendedField::Acce => Some(ExtendedField::Pot),
            ExtendedField::Endt => Some(ExtendedField::Acce),
            ExtendedField::Tstp => Some(ExtendedField::Endt),
        }
    }

    /// `true` for fields sized by the gas particle count.
    pub fn is_gas_only(self) -> bool {
        matches!(
            self,
            ExtendedField::Rho
                | ExtendedField::Ne
                | ExtendedField::Nh
                | ExtendedField::Hsml
                | ExtendedField::Endt
        )
    }

    /// Block name used in logs and layouts.
    pub fn name(self) -> &'static str {
        match self {
            ExtendedField::Rho => "rho",
            ExtendedField::Ne => "ne",
            ExtendedField::Nh => "nh",
            ExtendedField::Hsml => "hsml",
            ExtendedField::Pot => "pot",
            ExtendedField::Acce => "acce",
            ExtendedField::Endt => "endt",
            ExtendedField::Tstp => "tstp",
        }
    }

    /// Number of elements of this field for a body with `n_total` particles,
    /// `n_gas` of which are gas.
    pub fn element_count(self, n_total: usize, n_gas: usize) -> usize {
        if self.is_gas_only() {
            n_gas
        } else {
            n_total
        }
    }
}

impl fmt::Display for ExtendedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Set of optional fields closed under [`ExtendedField::requires`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedFieldSet(BTreeSet<ExtendedField>);

impl ExtendedFieldSet {
    /// Resolve the requested fields into the full set implied by the chain.
    ///
    /// Arguments
    /// -----------------
    /// * `requested`: Fields asked for by the caller, in any order, possibly repeated.
    ///
    /// Return
    /// ----------
    /// * The requested fields plus every field they transitively require.
    pub fn resolve(requested: &[ExtendedField]) -> Self {
        let mut set = BTreeSet::new();
        for &field in requested {
            let mut current = Some(field);
            while let Some(f) = current {
                // everything below an already present field is present too
                if !set.insert(f) {
                    break;
                }
                current = f.requires();
            }
        }
        ExtendedFieldSet(set)
    }

    pub fn contains(&self, field: ExtendedField) -> bool {
        self.0.contains(&field)
    }

    /// Present fields in on-disk order.
    pub fn iter(&self) -> impl Iterator<Item = ExtendedField> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test_extended_field {
    use super::*;

    #[test]
    fn test_declaration_order_is_disk_order() {
        let mut sorted = ExtendedField::ALL;
        sorted.sort();
        assert_eq!(sorted, ExtendedField::ALL);
    }

    #[test]
    fn test_tstp_enables_whole_chain() {
        let set = ExtendedFieldSet::resolve(&[ExtendedField::Tstp]);
        assert_eq!(set.len(), 8);
        assert_eq!(set.iter().collect::<Vec<_>>(), ExtendedField::ALL.to_vec());
    }

    #[test]
    fn test_acce_enables_lower_fields_only() {
        let set = ExtendedFieldSet::resolve(&[ExtendedField::Acce]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![
                ExtendedField::Rho,
                ExtendedField::Ne,
                ExtendedField::Nh,
                ExtendedField::Hsml,
                ExtendedField::Pot,
                ExtendedField::Acce,
            ]
        );
        assert!(!set.contains(ExtendedField::Endt));
        assert!(!set.contains(ExtendedField::Tstp));
    }

    #[test]
    fn test_resolution_is_idempotent_and_order_free() {
        let a = ExtendedFieldSet::resolve(&[ExtendedField::Ne, ExtendedField::Hsml]);
        let b = ExtendedFieldSet::resolve(&[ExtendedField::Hsml, ExtendedField::Hsml]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn test_empty_request() {
        let set = ExtendedFieldSet::resolve(&[]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_element_counts() {
        assert_eq!(ExtendedField::Rho.element_count(10, 3), 3);
        assert_eq!(ExtendedField::Endt.element_count(10, 3), 3);
        assert_eq!(ExtendedField::Pot.element_count(10, 3), 10);
        assert_eq!(ExtendedField::Acce.element_count(10, 3), 10);
        assert_eq!(ExtendedField::Tstp.element_count(10, 3), 10);
    }
}
