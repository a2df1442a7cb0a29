use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use shop_api::{StoreError, TableRecord};

use crate::table::{read_table, write_table};
use crate::token::RowToken;

// ════════════════════════════════════════════════════════════════
//  RecordStore
// ════════════════════════════════════════════════════════════════

/// Ordered, in-memory collection of one record kind, mirrored to a single
/// table file.
///
/// Memory is the source of truth for the session. Every mutation rewrites
/// the whole file; if that write fails the mutation is kept in memory and
/// the error is returned so the caller can retry with [`RecordStore::flush`].
///
/// There is no file locking. Two sessions on the same file overwrite each
/// other, last flush wins.
#[derive(Debug)]
pub struct RecordStore<T> {
    path: PathBuf,
    records: Vec<T>,
    /// Rows changed since the last successful flush.
    dirty: bool,
}

impl<T: TableRecord> RecordStore<T> {
    /// Read the backing file. See [`read_table`].
    pub fn load(path: &Path) -> Result<Vec<T>, StoreError> {
        read_table(path)
    }

    /// Open a store on `path`, loading whatever the file holds.
    ///
    /// A read failure is not fatal: the store starts empty and the error is
    /// handed back so it can be shown to the user.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
            dirty: false,
        };
        let notice = store.reload();
        (store, notice)
    }

    /// Replace the in-memory rows with the file's current contents,
    /// discarding unsaved changes.
    pub fn reload(&mut self) -> Option<StoreError> {
        self.dirty = false;
        match Self::load(&self.path) {
            Ok(records) => {
                self.records = records;
                None
            }
            Err(e) => {
                if e.is_warning() {
                    tracing::warn!(path = %self.path.display(), kind = T::KIND, "{e}, ignoring file");
                } else {
                    tracing::warn!(path = %self.path.display(), kind = T::KIND, error = %e, "load failed, starting empty");
                }
                self.records.clear();
                Some(e)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the last flush failed and memory is ahead of the file.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rows in display order (oldest first) with the token that selects
    /// each one for deletion.
    pub fn rows(&self) -> impl Iterator<Item = (RowToken, &T)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RowToken::at(i), r))
    }

    // ── Mutation ──

    /// Add `record` at the end and persist.
    pub fn append(&mut self, record: T) -> Result<(), StoreError> {
        self.records.push(record);
        self.dirty = true;
        tracing::info!(kind = T::KIND, rows = self.records.len(), "appended");
        self.flush()
    }

    /// Remove every record whose position (before deletion, 0-based) is in
    /// `indices`, keep the rest in order, and persist.
    ///
    /// Positions past the end are ignored. An empty selection is refused with
    /// [`StoreError::NothingSelected`] and leaves the file alone.
    pub fn delete_by_indices(&mut self, indices: &BTreeSet<usize>) -> Result<&[T], StoreError> {
        if indices.is_empty() {
            return Err(StoreError::NothingSelected);
        }

        let before = self.records.len();
        let mut position = 0;
        self.records.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        self.dirty = true;
        tracing::info!(
            kind = T::KIND,
            removed = before - self.records.len(),
            rows = self.records.len(),
            "deleted"
        );

        self.flush()?;
        Ok(&self.records)
    }

    /// Delete the rows selected by `tokens`. Unlike raw positions, a token
    /// that does not match a current row is refused before anything changes.
    /// Returns the number of rows removed.
    pub fn delete_rows(&mut self, tokens: &[RowToken]) -> Result<usize, StoreError> {
        if let Some(stale) = tokens.iter().find(|t| t.position() >= self.records.len()) {
            return Err(StoreError::UnknownRow(stale.to_string()));
        }
        let indices: BTreeSet<usize> = tokens.iter().map(|t| t.position()).collect();
        let count = indices.len();
        self.delete_by_indices(&indices)?;
        Ok(count)
    }

    /// Overwrite the backing file with the current rows.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        match write_table(&self.path, &self.records) {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!(path = %self.path.display(), kind = T::KIND, rows = self.records.len(), "flushed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), kind = T::KIND, error = %e, "flush failed, keeping rows in memory");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_api::SalespersonRecord;

    fn names(store: &RecordStore<SalespersonRecord>) -> Vec<&str> {
        store.records().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn open_missing_file_is_empty_without_notice() {
        let tmp = tempfile::tempdir().unwrap();
        let (store, notice) =
            RecordStore::<SalespersonRecord>::open(tmp.path().join("salespeople.csv"));
        assert!(store.is_empty());
        assert!(notice.is_none());
        // Nothing is written until the first mutation.
        assert!(!store.path().exists());
    }

    #[test]
    fn duplicates_are_allowed() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut store, _) =
            RecordStore::<SalespersonRecord>::open(tmp.path().join("salespeople.csv"));
        store.append(SalespersonRecord::new("Ana")).unwrap();
        store.append(SalespersonRecord::new("Ana")).unwrap();
        assert_eq!(names(&store), ["Ana", "Ana"]);
    }

    #[test]
    fn empty_selection_does_not_rewrite() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("salespeople.csv");
        let (mut store, _) = RecordStore::<SalespersonRecord>::open(&path);
        store.append(SalespersonRecord::new("Ana")).unwrap();

        // Edit behind the store's back; a rewrite would clobber it.
        std::fs::write(&path, "name\nZed\n").unwrap();

        let err = store.delete_by_indices(&BTreeSet::new()).unwrap_err();
        assert!(matches!(err, StoreError::NothingSelected));
        assert_eq!(names(&store), ["Ana"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "name\nZed\n");
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut store, _) =
            RecordStore::<SalespersonRecord>::open(tmp.path().join("salespeople.csv"));
        store.append(SalespersonRecord::new("Ana")).unwrap();
        store.append(SalespersonRecord::new("Bia")).unwrap();

        let left = store.delete_by_indices(&BTreeSet::from([1, 9])).unwrap();
        assert_eq!(left, [SalespersonRecord::new("Ana")]);
    }

    #[test]
    fn stale_token_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut store, _) =
            RecordStore::<SalespersonRecord>::open(tmp.path().join("salespeople.csv"));
        store.append(SalespersonRecord::new("Ana")).unwrap();

        let err = store
            .delete_rows(&[RowToken::at(0), RowToken::at(4)])
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownRow(t) if t == "4"));
        assert_eq!(names(&store), ["Ana"]);
    }

    #[test]
    fn rows_follow_insertion_order() {
        let tmp = tempfile::tempdir().unwrap();
        let (mut store, _) =
            RecordStore::<SalespersonRecord>::open(tmp.path().join("salespeople.csv"));
        for name in ["Ana", "Bia", "Caio"] {
            store.append(SalespersonRecord::new(name)).unwrap();
        }
        let labels: Vec<String> = store
            .rows()
            .map(|(token, r)| format!("{token} - {}", r.name))
            .collect();
        assert_eq!(labels, ["0 - Ana", "1 - Bia", "2 - Caio"]);
    }

    #[test]
    fn failed_flush_keeps_rows_in_memory() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("planilha");
        std::fs::write(&blocker, "").unwrap();

        let (mut store, _) =
            RecordStore::<SalespersonRecord>::open(blocker.join("salespeople.csv"));
        let err = store.append(SalespersonRecord::new("Ana")).unwrap_err();
        assert_eq!(err.kind(), shop_api::ErrorKind::Write);
        assert_eq!(names(&store), ["Ana"]);
        assert!(store.is_dirty());

        // Retry once the directory can be created.
        std::fs::remove_file(&blocker).unwrap();
        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(RecordStore::<SalespersonRecord>::load(store.path()).unwrap().len(), 1);
    }

    #[test]
    fn unreadable_file_falls_back_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("salespeople.csv");
        std::fs::write(&path, "name,age\nAna\n").unwrap();

        let (store, notice) = RecordStore::<SalespersonRecord>::open(&path);
        assert!(store.is_empty());
        assert_eq!(notice.unwrap().kind(), shop_api::ErrorKind::Read);
    }
}
