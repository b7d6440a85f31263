//! The table-store port.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{AnnouncementRow, TransactionRow};

/// Read-only queries the assistant runs against the community tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Exact number of rows in `warga`. `None` when the store reports no count.
    async fn count_residents(&self) -> Result<Option<u64>, StoreError>;

    /// Every row of `transaksi_keuangan`, `tipe` and `nominal` only.
    async fn list_transactions(&self) -> Result<Vec<TransactionRow>, StoreError>;

    /// Titles from `pengumuman`, newest `created_at` first, at most `limit`.
    async fn latest_announcements(&self, limit: usize)
        -> Result<Vec<AnnouncementRow>, StoreError>;
}
