//! In-memory [`TableStore`] for tests and offline runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::TableStore;
use crate::types::{AnnouncementRow, TransactionRow};

#[derive(Debug, Default)]
struct Tables {
    resident_count: Option<u64>,
    transactions: Vec<TransactionRow>,
    /// `(created_at epoch seconds, title)`.
    announcements: Vec<(i64, String)>,
    unavailable: Option<String>,
}

/// A store backed by plain vectors.
///
/// Builder methods consume and return `self`; setters take `&self` so a
/// store shared behind an `Arc` can be changed between requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_residents(self, count: u64) -> Self {
        self.set_residents(Some(count));
        self
    }

    pub fn with_transaction(self, tipe: &str, nominal: f64) -> Self {
        self.push_transaction(TransactionRow::new(tipe, nominal));
        self
    }

    pub fn with_announcement(self, title: &str, created_at: i64) -> Self {
        self.push_announcement(title, created_at);
        self
    }

    pub fn set_residents(&self, count: Option<u64>) {
        self.lock().resident_count = count;
    }

    pub fn push_transaction(&self, row: TransactionRow) {
        self.lock().transactions.push(row);
    }

    pub fn push_announcement(&self, title: &str, created_at: i64) {
        self.lock().announcements.push((created_at, title.to_string()));
    }

    /// Make every query fail with [`StoreError::Unavailable`] until cleared.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        self.lock().unavailable = reason.map(str::to_string);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A panic while holding the lock cannot leave the tables half-written.
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(tables: &Tables) -> Result<(), StoreError> {
        match &tables.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn count_residents(&self) -> Result<Option<u64>, StoreError> {
        let tables = self.lock();
        Self::check_available(&tables)?;
        Ok(tables.resident_count)
    }

    async fn list_transactions(&self) -> Result<Vec<TransactionRow>, StoreError> {
        let tables = self.lock();
        Self::check_available(&tables)?;
        Ok(tables.transactions.clone())
    }

    async fn latest_announcements(
        &self,
        limit: usize,
    ) -> Result<Vec<AnnouncementRow>, StoreError> {
        let tables = self.lock();
        Self::check_available(&tables)?;
        let mut sorted = tables.announcements.clone();
        sorted.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(sorted
            .into_iter()
            .take(limit)
            .map(|(_, judul)| AnnouncementRow { judul })
            .collect())
    }
}
