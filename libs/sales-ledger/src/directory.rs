use std::collections::BTreeSet;
use std::path::PathBuf;

use record_store::{RecordStore, RowToken};
use shop_api::{SalespersonRecord, StoreError};

/// The salesperson collection, and the one place that resolves the name a
/// sale carries back to a salesperson.
///
/// Sales reference salespeople by name only, so renaming or deleting a
/// salesperson leaves older sales pointing at a name that no longer
/// resolves. Keep every name lookup going through [`Self::lookup`].
#[derive(Debug)]
pub struct SalespersonDirectory {
    store: RecordStore<SalespersonRecord>,
}

impl SalespersonDirectory {
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StoreError>) {
        let (store, notice) = RecordStore::open(path);
        (Self { store }, notice)
    }

    pub fn store(&self) -> &RecordStore<SalespersonRecord> {
        &self.store
    }

    /// Re-read the file, picking up salespeople added by another session.
    /// Skipped while a failed save is pending, so unsaved rows survive.
    pub fn refresh(&mut self) -> Option<StoreError> {
        if self.store.is_dirty() {
            tracing::debug!("salespeople have unsaved changes, not refreshing");
            return None;
        }
        self.store.reload()
    }

    pub fn add(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("salesperson name"));
        }
        self.store.append(SalespersonRecord::new(name))
    }

    pub fn delete_by_indices(
        &mut self,
        indices: &BTreeSet<usize>,
    ) -> Result<&[SalespersonRecord], StoreError> {
        self.store.delete_by_indices(indices)
    }

    pub fn delete_rows(&mut self, tokens: &[RowToken]) -> Result<usize, StoreError> {
        self.store.delete_rows(tokens)
    }

    pub fn lookup(&self, name: &str) -> Option<&SalespersonRecord> {
        self.store.records().iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.store.records().iter().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
