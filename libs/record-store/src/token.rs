use serde::Serialize;
use shop_api::StoreError;

/// Handle for one row of a listing, handed out by [`RecordStore::rows`]
/// and given back to [`RecordStore::delete_rows`].
///
/// Rows have no stable id yet, so a token is the row's position at the time
/// it was listed. Callers must treat it as opaque so a stable id can replace
/// the position later without touching them.
///
/// [`RecordStore::rows`]: crate::RecordStore::rows
/// [`RecordStore::delete_rows`]: crate::RecordStore::delete_rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RowToken(usize);

impl RowToken {
    pub(crate) fn at(position: usize) -> Self {
        Self(position)
    }

    pub(crate) fn position(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RowToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RowToken {
    type Err = StoreError;

    /// Accepts a bare token (`3`) or a full selection label (`3 - Bob | Widget`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let head = s.split(" - ").next().unwrap_or(s).trim();
        head.parse::<usize>()
            .map(RowToken)
            .map_err(|_| StoreError::UnknownRow(s.to_string()))
    }
}
