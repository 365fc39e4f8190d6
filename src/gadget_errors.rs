use thiserror::Error;

#[derive(Error, Debug)]
pub enum GadgetError {
    #[error("No particles in header: both NumPart_ThisFile and NumPart_Total sum to zero")]
    EmptySnapshot,

    #[error("MassTable contains a negative value at index {index}: {value}")]
    NegativeMass { index: usize, value: f64 },

    #[error("NumFilesPerSnapshot must be at least 1, got {0}")]
    InvalidFileCount(i32),

    #[error("Unexpected dimensions for `{field}`: expected {expected}, found {found}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Particle IDs are not unique: {0} appears more than once")]
    DuplicateId(u64),

    #[error("Destination already exists and overwrite is forbidden: {0}")]
    DestinationExists(String),

    #[error("Header has wrong format: payload is {payload_bytes} bytes instead of 256")]
    HeaderFormatError { payload_bytes: usize },

    #[error("Block `{block}` is {nbytes} bytes and does not fit a 32-bit size marker")]
    BlockTooLarge { block: &'static str, nbytes: usize },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unknown overwrite policy: {0}")]
    UnknownOverwritePolicy(String),
}

impl GadgetError {
    /// `true` when the error was raised before any byte reached the destination.
    ///
    /// [`GadgetError::BlockTooLarge`] counts as a validation error: the body
    /// layout is computed before the header is written.
    ///
    /// Encoding and I/O failures return `false`: whatever was written to the
    /// destination must be discarded by the caller.
    pub fn is_validation_error(&self) -> bool {
        use GadgetError::*;
        match self {
            EmptySnapshot
            | NegativeMass { .. }
            | InvalidFileCount(_)
            | ShapeMismatch { .. }
            | DuplicateId(_)
            | DestinationExists(_)
            | BlockTooLarge { .. }
            | UnknownOverwritePolicy(_) => true,
            HeaderFormatError { .. } | IoError(_) => false,
        }
    }
}

impl PartialEq for GadgetError {
    fn eq(&self, other: &Self) -> bool {
        use GadgetError::*;
        match (self, other) {
            (EmptySnapshot, EmptySnapshot) => true,
            (
                NegativeMass {
                    index: a,
                    value: va,
                },
                NegativeMass {
                    index: b,
                    value: vb,
                },
            ) => a == b && va == vb,
            (InvalidFileCount(a), InvalidFileCount(b)) => a == b,
            (
                ShapeMismatch {
                    field: fa,
                    expected: ea,
                    found: na,
                },
                ShapeMismatch {
                    field: fb,
                    expected: eb,
                    found: nb,
                },
            ) => fa == fb && ea == eb && na == nb,
            (DuplicateId(a), DuplicateId(b)) => a == b,
            (DestinationExists(a), DestinationExists(b)) => a == b,
            (HeaderFormatError { payload_bytes: a }, HeaderFormatError { payload_bytes: b }) => {
                a == b
            }
            (
                BlockTooLarge {
                    block: ba,
                    nbytes: na,
                },
                BlockTooLarge {
                    block: bb,
                    nbytes: nb,
                },
            ) => ba == bb && na == nb,
            (UnknownOverwritePolicy(a), UnknownOverwritePolicy(b)) => a == b,

            // io::Error is not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
