use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use shop_api::{StoreError, TableRecord};

use crate::atomic::replace_file_atomic;

// ════════════════════════════════════════════════════════════════
//  Read
// ════════════════════════════════════════════════════════════════

/// Read every row of a table file, in file order.
///
/// A missing file, or a file without even a header row, is an empty table.
/// A header that lacks one of `T::COLUMNS` is [`StoreError::Schema`].
pub fn read_table<T: TableRecord>(path: &Path) -> Result<Vec<T>, StoreError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), kind = T::KIND, "no table file yet");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let parse_err = |source: csv::Error| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(BufReader::new(file));

    {
        let headers = reader.headers().map_err(parse_err)?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(column) = T::COLUMNS
            .iter()
            .copied()
            .find(|column| !headers.iter().any(|h| h == *column))
        {
            return Err(StoreError::Schema {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let records = reader
        .deserialize::<T>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(parse_err)?;

    tracing::debug!(path = %path.display(), kind = T::KIND, rows = records.len(), "read table");
    Ok(records)
}

// ════════════════════════════════════════════════════════════════
//  Write
// ════════════════════════════════════════════════════════════════

/// Overwrite `path` with a header row and one row per record.
///
/// The header is always written, so an empty collection reloads as an
/// empty table rather than a file with no schema.
pub fn write_table<T: TableRecord>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    replace_file_atomic(path, |file| {
        let encode_err = |source: csv::Error| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut *file);
        writer.write_record(T::COLUMNS).map_err(encode_err)?;
        for record in records {
            writer.serialize(record).map_err(encode_err)?;
        }
        writer.flush().map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    })
}
