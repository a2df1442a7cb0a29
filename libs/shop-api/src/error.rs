use std::path::PathBuf;

/// Category of a store error. Lets the presentation layer decide how to
/// report it (notice, inline warning) without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backing file exists but cannot be read or has the wrong shape.
    /// Recovered locally: the collection falls back to empty.
    Read,
    /// Backing file or its directory cannot be written.
    /// In-memory state is kept, the user may retry.
    Write,
    /// Action refused before any mutation (missing field, nothing selected).
    Validation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Read => f.write_str("read"),
            ErrorKind::Write => f.write_str("write"),
            ErrorKind::Validation => f.write_str("validation"),
        }
    }
}

/// Unified error type for record stores and the sales ledger.
///
/// None of these is fatal: every variant leaves the store in an
/// unchanged-or-best-effort state and returns control to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    // ── Read ──
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("{} has no '{column}' column", path.display())]
    Schema {
        path: PathBuf,
        column: &'static str,
    },

    #[error("totals of {0} overflow the amount range")]
    AmountOverflow(&'static str),

    // ── Write ──
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot encode row for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: csv::Error,
    },

    // ── Validation ──
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    #[error("amount paid {paid} is outside 0..={total}")]
    PaidOutOfRange {
        paid: rust_decimal::Decimal,
        total: rust_decimal::Decimal,
    },

    #[error("no salesperson selected")]
    NoSalesperson,

    #[error("unknown salesperson '{0}'")]
    UnknownSalesperson(String),

    #[error("unknown client '{0}', register the client first")]
    UnknownClient(String),

    #[error("nothing selected")]
    NothingSelected,

    #[error("no row with token '{0}'")]
    UnknownRow(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Read { .. }
            | StoreError::Parse { .. }
            | StoreError::Schema { .. }
            | StoreError::AmountOverflow(_) => ErrorKind::Read,
            StoreError::CreateDir { .. } | StoreError::Write { .. } | StoreError::Encode { .. } => {
                ErrorKind::Write
            }
            StoreError::MissingField(_)
            | StoreError::NegativeAmount(_)
            | StoreError::PaidOutOfRange { .. }
            | StoreError::NoSalesperson
            | StoreError::UnknownSalesperson(_)
            | StoreError::UnknownClient(_)
            | StoreError::NothingSelected
            | StoreError::UnknownRow(_) => ErrorKind::Validation,
        }
    }

    /// A file with an unexpected column layout is reported as a warning,
    /// not as a read failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, StoreError::Schema { .. })
    }
}
