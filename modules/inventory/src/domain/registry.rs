use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::error::InventoryError;
use crate::domain::model::SystemRecord;

/// In-memory store of system records, keyed by hostname.
///
/// Hostnames compare case-insensitively; the lowercased form is the map key
/// and the record keeps the original spelling for display. The map is
/// ordered, so host listings come back in a stable order.
pub struct Registry {
    records: RwLock<BTreeMap<String, Arc<SystemRecord>>>,
}

fn key_of(hostname: &str) -> String {
    hostname.to_ascii_lowercase()
}

impl Registry {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Snapshot of the known hostnames, in key order.
    pub fn hostnames(&self) -> Vec<String> {
        self.records
            .read()
            .values()
            .map(|r| r.hostname().to_owned())
            .collect()
    }

    /// Snapshot of the records themselves, for fan-out dispatch.
    pub fn list(&self) -> Vec<Arc<SystemRecord>> {
        self.records.read().values().cloned().collect()
    }

    pub fn get(&self, hostname: &str) -> Option<Arc<SystemRecord>> {
        self.records.read().get(&key_of(hostname)).cloned()
    }

    /// Insert a record if its hostname is not already present.
    ///
    /// Check and insert happen under one write-lock critical section, so two
    /// concurrent inserts for the same hostname cannot both succeed; the
    /// losing insert gets `AlreadyExists` and the existing record is left
    /// untouched.
    pub fn insert(&self, record: SystemRecord) -> Result<Arc<SystemRecord>, InventoryError> {
        let key = key_of(record.hostname());
        let mut records = self.records.write();
        if records.contains_key(&key) {
            return Err(InventoryError::AlreadyExists(record.hostname().to_owned()));
        }
        let record = Arc::new(record);
        records.insert(key, Arc::clone(&record));
        Ok(record)
    }

    /// Swap in a rebuilt record for an existing hostname.
    pub fn replace(&self, record: SystemRecord) -> Result<Arc<SystemRecord>, InventoryError> {
        let key = key_of(record.hostname());
        let mut records = self.records.write();
        if !records.contains_key(&key) {
            return Err(InventoryError::NotFound(record.hostname().to_owned()));
        }
        let record = Arc::new(record);
        records.insert(key, Arc::clone(&record));
        Ok(record)
    }

    pub fn remove(&self, hostname: &str) -> Result<(), InventoryError> {
        self.records
            .write()
            .remove(&key_of(hostname))
            .map(|_| ())
            .ok_or_else(|| InventoryError::NotFound(hostname.to_owned()))
    }

    /// Zero the metrics of every record, leaving identities untouched.
    pub fn reset_all(&self) {
        for record in self.records.read().values() {
            record.reset_metrics();
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
