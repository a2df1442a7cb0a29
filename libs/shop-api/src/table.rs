use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record that lives as one row of a flat table file with a header row.
///
/// `COLUMNS` lists the header in write order and must follow the struct's
/// field order, since rows are serialized positionally under it. On load
/// every listed column must be present; extra columns are ignored.
pub trait TableRecord: Serialize + DeserializeOwned {
    /// Collection name used in log lines.
    const KIND: &'static str;
    const COLUMNS: &'static [&'static str];
}
